//! Coach agent: narrative feedback for a finished squat session.

use async_trait::async_trait;
use formcheck_analysis::{FinalVerdict, SessionSummary, DEPTH_ANGLE, EXTENSION_ANGLE};
use formcheck_core::{BodySide, SessionId};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::agent::{Agent, AgentConfig, AgentError, AgentResponse, AgentResult};
use crate::model::SharedModel;
use crate::prompts::{
    escape_html, extract_cues, format_coach_input, strip_code_fences, COACH_SYSTEM_PROMPT,
};

/// Torso lean past this at the bottom is called out as folding forward
pub const EXCESSIVE_LEAN_ANGLE: f64 = 45.0;

/// Coach Agent input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachInput {
    pub summary: SessionSummary,
    pub verdict: FinalVerdict,
}

/// Where the commentary came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "lowercase")]
pub enum CommentarySource {
    Model(String),
    Rules,
}

/// Coach Agent output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachOutput {
    pub session_id: SessionId,
    /// One-line takeaway
    pub headline: String,
    /// Individual coaching cues
    pub cues: Vec<String>,
    /// HTML fragment for display
    pub html: String,
    pub source: CommentarySource,
    pub generation_time_ms: u64,
}

impl CoachOutput {
    pub fn to_response(&self, agent_name: &str) -> AgentResponse {
        AgentResponse {
            agent_name: agent_name.to_string(),
            content: self.html.clone(),
            generation_time_ms: self.generation_time_ms,
            model: match &self.source {
                CommentarySource::Model(id) => Some(id.clone()),
                CommentarySource::Rules => None,
            },
        }
    }
}

/// Coach Agent implementation
pub struct CoachAgent {
    config: AgentConfig,
    model: Option<SharedModel>,
    name: String,
}

impl CoachAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            model: None,
            name: "Coach".to_string(),
        }
    }

    /// Route commentary through a hosted language model
    pub fn with_model(mut self, model: SharedModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Generate coaching commentary for a session
    pub async fn coach(&self, input: &CoachInput) -> AgentResult<CoachOutput> {
        let summary = &input.summary;
        let (Some(highest), Some(lowest)) = (summary.highest_angle, summary.lowest_angle) else {
            return Err(AgentError::InvalidInput("Session has no analyzed frames".to_string()));
        };

        let started = Instant::now();

        let mut output = match &self.model {
            Some(model) => self.generate_model_response(model, input, highest, lowest).await?,
            None => self.generate_rule_response(input, highest, lowest),
        };

        output.generation_time_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            session = %output.session_id,
            cues = output.cues.len(),
            source = ?output.source,
            "Coach commentary generated"
        );

        Ok(output)
    }

    async fn generate_model_response(
        &self,
        model: &SharedModel,
        input: &CoachInput,
        highest: f64,
        lowest: f64,
    ) -> AgentResult<CoachOutput> {
        let summary_json = input.summary.to_json()?;
        let prompt = format_coach_input(&input.verdict.message, highest, lowest, &summary_json);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let request = model.complete(COACH_SYSTEM_PROMPT, &prompt, &self.config);
        let reply = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| AgentError::Timeout(self.config.timeout_ms))??;

        let html = strip_code_fences(&reply);
        if html.is_empty() {
            return Err(AgentError::LlmError("Empty response".to_string()));
        }

        Ok(CoachOutput {
            session_id: input.summary.session_id,
            headline: input.verdict.message.clone(),
            cues: extract_cues(html),
            html: html.to_string(),
            source: CommentarySource::Model(model.id().to_string()),
            generation_time_ms: 0,
        })
    }

    /// Deterministic commentary from the angle extremes
    fn generate_rule_response(&self, input: &CoachInput, highest: f64, lowest: f64) -> CoachOutput {
        let mut cues = Vec::new();

        if highest <= DEPTH_ANGLE {
            cues.push(format!(
                "Sink deeper: your torso only reached {:.0}° from vertical. \
                 Let your hips travel back and down until it passes {:.0}°.",
                highest, DEPTH_ANGLE
            ));
        } else if highest > EXCESSIVE_LEAN_ANGLE {
            cues.push(format!(
                "Your torso leaned {:.0}° at the bottom. \
                 Keep your chest up and brace so you don't fold forward.",
                highest
            ));
        }

        if lowest > EXTENSION_ANGLE {
            cues.push(format!(
                "Finish every rep standing tall: drive your hips through until your torso \
                 is within {:.0}° of vertical (you stopped at {:.0}°).",
                EXTENSION_ANGLE, lowest
            ));
        }

        if cues.is_empty() {
            cues.push("Keep the same depth and tempo on every rep.".to_string());
        }

        if let Some(side) = dominant_side(&input.summary) {
            cues.push(format!(
                "Measured from your {} side; \
                 keep the camera side-on at hip height for consistent tracking.",
                side
            ));
        }

        let headline = input.verdict.message.clone();
        let items: String = cues
            .iter()
            .map(|cue| format!("<li>{}</li>", escape_html(cue)))
            .collect();
        let html = format!("<p>{}</p><ul>{}</ul>", escape_html(&headline), items);

        CoachOutput {
            session_id: input.summary.session_id,
            headline,
            cues,
            html,
            source: CommentarySource::Rules,
            generation_time_ms: 0,
        }
    }
}

impl Default for CoachAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

/// Side used by most sampled frames; left on ties
fn dominant_side(summary: &SessionSummary) -> Option<BodySide> {
    let left = summary.frames.iter().filter(|f| f.side == BodySide::Left).count();
    let right = summary.frames.len() - left;

    match (left, right) {
        (0, 0) => None,
        (l, r) if l >= r => Some(BodySide::Left),
        _ => Some(BodySide::Right),
    }
}

#[async_trait]
impl Agent for CoachAgent {
    fn name(&self) -> &str {
        &self.name
    }

    /// Input is a JSON-encoded [`CoachInput`]; output is the HTML commentary
    async fn process(&self, input: &str) -> AgentResult<String> {
        self.validate_input(input)?;
        let input: CoachInput = serde_json::from_str(input)?;
        Ok(self.coach(&input).await?.html)
    }
}
