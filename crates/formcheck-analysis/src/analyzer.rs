//! Per-session analyzer tying side selection and evaluation together.

use formcheck_core::Pose;

use crate::evaluator::{evaluate_session, process_frame, reset_session};
use crate::exercise::Exercise;
use crate::feedback::{FinalVerdict, LiveFeedback, StatusColor};
use crate::selector::select_side;
use crate::session::{SessionAccumulator, SessionSummary};

/// Form analyzer for one exercise.
///
/// Owns its session. The caller drives it by handing in one pose per
/// frame, in order; nothing here is shared across threads.
#[derive(Debug, Clone)]
pub struct FormAnalyzer {
    exercise: Exercise,
    session: SessionAccumulator,
}

impl FormAnalyzer {
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            session: SessionAccumulator::new(),
        }
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn session(&self) -> &SessionAccumulator {
        &self.session
    }

    /// Analyze one frame's pose
    pub fn analyze(&mut self, pose: &Pose) -> LiveFeedback {
        match self.exercise {
            Exercise::Squat => match select_side(pose) {
                Some(selected) => process_frame(&mut self.session, &selected),
                None => {
                    tracing::debug!(
                        detected = pose.detected_count(),
                        overall = ?pose.overall_confidence,
                        "No side tracked reliably, frame skipped"
                    );
                    LiveFeedback::keypoints_unreliable()
                }
            },
            Exercise::Rdl => {
                LiveFeedback::new("RDL feedback not implemented", StatusColor::Orange)
            }
            _ => LiveFeedback::new("No feedback available", StatusColor::Gray),
        }
    }

    /// Verdict for everything analyzed since the last reset
    pub fn finish(&mut self) -> FinalVerdict {
        evaluate_session(&mut self.session)
    }

    pub fn summary(&self, sampling_rate: usize) -> SessionSummary {
        self.session.summary(sampling_rate)
    }

    /// Start over, e.g. on a new upload
    pub fn reset(&mut self) {
        reset_session(&mut self.session);
    }

    /// Switch exercise; always starts a fresh session
    pub fn set_exercise(&mut self, exercise: Exercise) {
        self.exercise = exercise;
        self.reset();
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self::new(Exercise::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FormGrade;
    use crate::session::{SessionState, DEFAULT_SAMPLING_RATE};
    use formcheck_core::{Keypoint, KeypointDetection, Position2D};

    fn squat_pose(hip_x: f64, confidence: f32) -> Pose {
        let at = |x, y| Position2D::new(x, y);
        Pose::from_detections([
            KeypointDetection::new(Keypoint::RightShoulder, at(100.0, 50.0), confidence),
            KeypointDetection::new(Keypoint::RightHip, at(hip_x, 150.0), confidence),
            KeypointDetection::new(Keypoint::RightKnee, at(120.0, 220.0), confidence),
            KeypointDetection::new(Keypoint::LeftShoulder, at(90.0, 50.0), 0.3),
        ])
    }

    #[test]
    fn test_squat_session_workflow() {
        let mut analyzer = FormAnalyzer::new(Exercise::Squat);

        // Stand tall, sink, stand again
        for hip_x in [100.0, 120.0, 150.0, 160.0, 130.0, 105.0] {
            let feedback = analyzer.analyze(&squat_pose(hip_x, 0.9));
            assert_eq!(feedback.status, StatusColor::Blue);
        }

        let verdict = analyzer.finish();
        assert_eq!(verdict.grade, FormGrade::Good);
        assert_eq!(analyzer.session().state(), SessionState::Evaluated);
        assert!(analyzer
            .session()
            .frame_history()
            .iter()
            .all(|f| f.side == formcheck_core::BodySide::Right));

        let summary = analyzer.summary(DEFAULT_SAMPLING_RATE);
        assert_eq!(summary.total_frames, 6);
        assert_eq!(summary.sampled_frames, 1);
    }

    #[test]
    fn test_unreliable_frame() {
        let mut analyzer = FormAnalyzer::default();
        let feedback = analyzer.analyze(&squat_pose(150.0, 0.4));
        assert_eq!(feedback.status, StatusColor::Yellow);
        assert_eq!(feedback.message, "Required keypoints not detected reliably");
        assert!(analyzer.session().is_empty());
    }

    #[test]
    fn test_unsupported_exercises_leave_session_untouched() {
        let mut analyzer = FormAnalyzer::new(Exercise::Rdl);
        let feedback = analyzer.analyze(&squat_pose(150.0, 0.9));
        assert_eq!(feedback.status, StatusColor::Orange);

        analyzer.set_exercise(Exercise::Plank);
        let feedback = analyzer.analyze(&squat_pose(150.0, 0.9));
        assert_eq!(feedback.message, "No feedback available");
        assert_eq!(analyzer.finish(), FinalVerdict::no_data());
    }

    #[test]
    fn test_reset_clears_session() {
        let mut analyzer = FormAnalyzer::default();
        analyzer.analyze(&squat_pose(150.0, 0.9));
        analyzer.reset();
        assert_eq!(analyzer.session().frame_count(), 0);
        assert_eq!(analyzer.finish().grade, FormGrade::NoData);
    }
}
