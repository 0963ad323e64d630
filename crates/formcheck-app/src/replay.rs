//! Replays recorded pose output through a [`FormAnalyzer`].
//!
//! Input is newline-delimited JSON, one pose per line in the shape the pose
//! model emits (`{"score": .., "keypoints": [{"part", "position", "score"}]}`).
//! Lines are fed to the analyzer in order, one at a time.

use anyhow::{Context, Result};
use formcheck_analysis::{FinalVerdict, FormAnalyzer, SessionSummary, StatusColor};
use formcheck_core::{Pose, RawPose};
use serde::Serialize;
use std::io::BufRead;

/// Outcome of replaying one recording
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub exercise: String,
    /// Non-empty lines read
    pub frames_read: usize,
    /// Lines that failed to parse or validate
    pub frames_rejected: usize,
    /// Frames where no body side was tracked reliably
    pub frames_unreliable: usize,
    /// Frames that produced a torso angle
    pub frames_measured: usize,
    pub verdict: FinalVerdict,
    pub summary: SessionSummary,
}

/// Drive `analyzer` over every pose in `reader`, then evaluate the session
pub fn replay<R: BufRead>(
    reader: R,
    analyzer: &mut FormAnalyzer,
    sampling_rate: usize,
) -> Result<ReplayReport> {
    let mut frames_read = 0;
    let mut frames_rejected = 0;
    let mut frames_unreliable = 0;
    let mut frames_measured = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read pose line {}", line_no + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        frames_read += 1;

        let pose = match parse_pose(line) {
            Ok(pose) => pose,
            Err(e) => {
                tracing::warn!(line = line_no + 1, "Rejected pose: {:#}", e);
                frames_rejected += 1;
                continue;
            }
        };

        let feedback = analyzer.analyze(&pose);
        if feedback.angle.is_some() {
            frames_measured += 1;
        } else if feedback.status == StatusColor::Yellow {
            frames_unreliable += 1;
        }
        tracing::trace!(line = line_no + 1, message = %feedback.message, angle = ?feedback.angle);
    }

    let verdict = analyzer.finish();
    tracing::info!(
        frames_read,
        frames_rejected,
        frames_measured,
        status = %verdict.status,
        "Replay finished"
    );

    Ok(ReplayReport {
        exercise: analyzer.exercise().to_string(),
        frames_read,
        frames_rejected,
        frames_unreliable,
        frames_measured,
        verdict,
        summary: analyzer.summary(sampling_rate),
    })
}

fn parse_pose(line: &str) -> Result<Pose> {
    let raw: RawPose = serde_json::from_str(line).context("Malformed pose JSON")?;
    Ok(Pose::from_raw(&raw)?)
}
