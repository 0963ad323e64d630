//! Session-scoped accumulator for squat analysis.

use formcheck_core::{AngleExtremes, BodySide, Position2D, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::selector::SelectedSide;

/// Keep every Nth frame when summarising a session for narration
pub const DEFAULT_SAMPLING_RATE: usize = 50;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Nothing processed since creation or the last reset
    Empty,
    /// At least one frame processed
    Accumulating,
    /// A verdict has been produced from the accumulated frames
    Evaluated,
}

/// Joint positions recorded for one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub side: BodySide,
    pub angle: f64,
    pub shoulder: Position2D,
    pub elbow: Option<Position2D>,
    pub wrist: Option<Position2D>,
    pub hip: Position2D,
    pub knee: Option<Position2D>,
    pub ankle: Option<Position2D>,
}

impl FrameSnapshot {
    /// Snapshot a selected side. Shoulder and hip must be present.
    pub fn capture(selected: &SelectedSide, angle: f64) -> Option<Self> {
        Some(Self {
            side: selected.side,
            angle,
            shoulder: selected.shoulder?.position,
            elbow: selected.elbow.map(|kp| kp.position),
            wrist: selected.wrist.map(|kp| kp.position),
            hip: selected.hip?.position,
            knee: selected.knee.map(|kp| kp.position),
            ankle: selected.ankle.map(|kp| kp.position),
        })
    }
}

/// Mutable state of one exercise attempt.
///
/// Created at session start, mutated once per processed frame, read at the
/// end to produce a verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAccumulator {
    session_id: SessionId,
    started_at: Timestamp,
    state: SessionState,
    extremes: AngleExtremes,
    frame_history: Vec<FrameSnapshot>,
}

impl SessionAccumulator {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            started_at: Timestamp::now(),
            state: SessionState::Empty,
            extremes: AngleExtremes::new(),
            frame_history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn extremes(&self) -> &AngleExtremes {
        &self.extremes
    }

    pub fn frame_history(&self) -> &[FrameSnapshot] {
        &self.frame_history
    }

    /// Lowest recorded angle, `+inf` while empty
    pub fn lowest_angle(&self) -> f64 {
        self.extremes.lowest
    }

    /// Highest recorded angle, `-inf` while empty
    pub fn highest_angle(&self) -> f64 {
        self.extremes.highest
    }

    pub fn is_empty(&self) -> bool {
        self.extremes.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.frame_history.len()
    }

    pub(crate) fn record(&mut self, snapshot: FrameSnapshot) {
        self.extremes.observe(snapshot.angle);
        self.frame_history.push(snapshot);
        self.state = SessionState::Accumulating;
    }

    pub(crate) fn mark_evaluated(&mut self) {
        self.state = SessionState::Evaluated;
    }

    /// Back to `Empty` under a fresh session id
    pub(crate) fn clear(&mut self) {
        self.session_id = SessionId::new();
        self.started_at = Timestamp::now();
        self.state = SessionState::Empty;
        self.extremes.reset();
        self.frame_history.clear();
    }

    /// Sampled view of the session for the narrative collaborator
    pub fn summary(&self, sampling_rate: usize) -> SessionSummary {
        let rate = sampling_rate.max(1);
        let frames: Vec<FrameSnapshot> = self
            .frame_history
            .iter()
            .step_by(rate)
            .copied()
            .collect();

        SessionSummary {
            session_id: self.session_id,
            started_at: self.started_at,
            highest_angle: self.extremes.highest(),
            lowest_angle: self.extremes.lowest(),
            total_frames: self.frame_history.len(),
            sampled_frames: frames.len(),
            frames,
        }
    }
}

impl Default for SessionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable digest of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub started_at: Timestamp,
    pub highest_angle: Option<f64>,
    pub lowest_angle: Option<f64>,
    pub frames: Vec<FrameSnapshot>,
    pub total_frames: usize,
    pub sampled_frames: usize,
}

impl SessionSummary {
    pub fn is_empty(&self) -> bool {
        self.total_frames == 0
    }

    pub fn to_json(&self) -> formcheck_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
