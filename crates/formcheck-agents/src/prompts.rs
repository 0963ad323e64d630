//! Prompt templates for the coach agent.

/// System prompt for the Coach Agent
pub const COACH_SYSTEM_PROMPT: &str = r#"You are an experienced strength coach reviewing a squat
recorded from the side.

You will receive:
1. The automatic verdict for the session
2. The highest and lowest torso angle from vertical, in degrees
3. Sampled joint positions (pixel coordinates, y grows downward) with the tracked body
   side

A larger torso angle means more forward lean at the bottom of the squat; an angle near zero
means the lifter is standing tall.

Your task is to:
- Explain the verdict in plain language
- Give two or three concrete cues to improve depth, extension or torso position
- Mention anything notable in the joint positions

Respond with a short HTML fragment using only <p>, <ul> and <li>. Do not wrap it in a code
block. Keep it under 150 words."#;

/// Template for Coach Agent input
pub fn format_coach_input(verdict: &str, highest: f64, lowest: f64, session_json: &str) -> String {
    format!(
        r#"=== SQUAT SESSION REVIEW ===

Automatic Verdict:
{}

Torso Angle From Vertical:
Highest: {:.1}°
Lowest: {:.1}°

Session Data (JSON):
{}

Please review this squat and give coaching feedback."#,
        verdict, highest, lowest, session_json
    )
}

/// Remove a surrounding markdown code fence (```html ... ```) if present
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "html") on the opening fence line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Pull bullet cues out of an HTML or markdown reply
pub fn extract_cues(response: &str) -> Vec<String> {
    let mut cues = Vec::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("- ") {
            push_cue(&mut cues, rest);
            continue;
        }

        let mut remaining = trimmed;
        while let Some(start) = remaining.find("<li>") {
            let after = &remaining[start + 4..];
            let end = after.find("</li>").unwrap_or(after.len());
            push_cue(&mut cues, &after[..end]);
            remaining = &after[end..];
        }
    }

    cues
}

fn push_cue(cues: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        cues.push(text.to_string());
    }
}

/// Minimal escaping for text placed inside HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coach_input() {
        let input = format_coach_input("Moderate form", 22.34, 8.0, "{\"totalFrames\":3}");

        assert!(input.contains("Moderate form"));
        assert!(input.contains("Highest: 22.3°"));
        assert!(input.contains("Lowest: 8.0°"));
        assert!(input.contains("totalFrames"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```html\n<p>Hi</p>\n```"), "<p>Hi</p>");
        assert_eq!(strip_code_fences("  <p>Plain</p> "), "<p>Plain</p>");
        assert_eq!(strip_code_fences("```\n<p>x</p>```"), "<p>x</p>");
    }

    #[test]
    fn test_extract_cues() {
        let html = "<p>Good effort.</p>\n<ul><li>Sit back</li><li> Brace core </li></ul>";
        assert_eq!(extract_cues(html), vec!["Sit back", "Brace core"]);

        let markdown = "Summary\n- Knees out\n- \n- Chest up";
        assert_eq!(extract_cues(markdown), vec!["Knees out", "Chest up"]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
