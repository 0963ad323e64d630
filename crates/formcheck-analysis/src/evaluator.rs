//! Squat form evaluation from the torso angle.
//!
//! Each usable frame contributes the angle between the shoulder-hip line and
//! vertical. The session verdict is read from the smallest and largest angle
//! seen: a deep squat tilts the torso forward (high angle), standing tall
//! brings it back near vertical (low angle).

use formcheck_core::torso_angle;

use crate::feedback::{FinalVerdict, FormGrade, LiveFeedback};
use crate::selector::SelectedSide;
use crate::session::{FrameSnapshot, SessionAccumulator};

/// Highest angle above this counts as reaching full depth
pub const DEPTH_ANGLE: f64 = 24.0;
/// Lowest angle at or below this counts as full extension
pub const EXTENSION_ANGLE: f64 = 20.0;
/// Lower edge of the moderate band for the highest angle
pub const MODERATE_ANGLE: f64 = 20.0;

/// Feed one frame's selected side into the session.
///
/// Frames missing the shoulder or hip are skipped without touching the
/// session. The return value is always the transient "analyzing" status;
/// the verdict comes from [`evaluate_session`].
pub fn process_frame(
    session: &mut SessionAccumulator,
    selected: &SelectedSide,
) -> LiveFeedback {
    let (Some(shoulder), Some(hip)) = (selected.shoulder, selected.hip) else {
        tracing::trace!(side = %selected.side, "Skipping frame without shoulder/hip");
        return LiveFeedback::analyzing(None);
    };

    let angle = torso_angle(&shoulder.position, &hip.position);

    if let Some(snapshot) = FrameSnapshot::capture(selected, angle) {
        session.record(snapshot);
    }

    LiveFeedback::analyzing(Some(angle))
}

/// Fixed decision table over the session extremes
pub fn classify(highest: f64, lowest: f64) -> (FormGrade, &'static str) {
    let extended = lowest <= EXTENSION_ANGLE;

    if highest > DEPTH_ANGLE {
        if extended {
            (
                FormGrade::Good,
                "Excellent squat form! You're achieving a full range of motion.",
            )
        } else {
            (
                FormGrade::Caution,
                "You're extending well but not squatting deep enough. \
                 Try to lower your hips further below knee level.",
            )
        }
    } else if highest >= MODERATE_ANGLE {
        if extended {
            (
                FormGrade::Caution,
                "Moderate form; increase your depth for a better squat.",
            )
        } else {
            (
                FormGrade::Caution,
                "You need to improve both depth and extension. \
                 Aim to lower your hips more and rise fully.",
            )
        }
    } else if extended {
        (
            FormGrade::Bad,
            "Very poor form. It's crucial to squat deeper and fully extend your legs.",
        )
    } else {
        (
            FormGrade::Bad,
            "Poor form noted. Focus on deepening your squat and fully extending your legs.",
        )
    }
}

/// Produce the end-of-session verdict.
///
/// An empty session yields the "no data" verdict and stays `Empty`.
pub fn evaluate_session(session: &mut SessionAccumulator) -> FinalVerdict {
    let extremes = *session.extremes();
    let (Some(highest), Some(lowest)) = (extremes.highest(), extremes.lowest()) else {
        tracing::info!(session = %session.session_id(), "Evaluated session with no data");
        return FinalVerdict::no_data();
    };

    let (grade, message) = classify(highest, lowest);
    session.mark_evaluated();

    tracing::info!(
        session = %session.session_id(),
        frames = session.frame_count(),
        highest,
        lowest,
        ?grade,
        "Evaluated squat session"
    );

    FinalVerdict::graded(grade, message, Some(highest), Some(lowest))
}

/// Discard all frames and restore the sentinel extremes
pub fn reset_session(session: &mut SessionAccumulator) {
    tracing::info!(
        session = %session.session_id(),
        frames = session.frame_count(),
        "Resetting squat session"
    );
    session.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::StatusColor;
    use crate::session::SessionState;
    use formcheck_core::{BodySide, Keypoint, KeypointDetection, Position2D};

    fn side(shoulder: Option<(f64, f64)>, hip: Option<(f64, f64)>) -> SelectedSide {
        let det = |kp: Keypoint, (x, y): (f64, f64)| {
            KeypointDetection::new(kp, Position2D::new(x, y), 0.9)
        };
        SelectedSide {
            side: BodySide::Left,
            shoulder: shoulder.map(|p| det(Keypoint::LeftShoulder, p)),
            elbow: None,
            wrist: None,
            hip: hip.map(|p| det(Keypoint::LeftHip, p)),
            knee: Some(det(Keypoint::LeftKnee, (100.0, 250.0))),
            ankle: None,
        }
    }

    /// Frame whose torso sits at `degrees` from vertical
    fn tilted(degrees: f64) -> SelectedSide {
        let rad = degrees.to_radians();
        side(
            Some((100.0, 50.0)),
            Some((100.0 + 100.0 * rad.sin(), 50.0 + 100.0 * rad.cos())),
        )
    }

    #[test]
    fn test_vertical_frame() {
        let mut session = SessionAccumulator::new();
        let upright = side(Some((100.0, 50.0)), Some((100.0, 150.0)));
        let feedback = process_frame(&mut session, &upright);

        assert_eq!(feedback.status, StatusColor::Blue);
        assert_eq!(feedback.message, "Analyzing squat...");
        assert_eq!(feedback.angle, Some(0.0));
        assert_eq!(session.lowest_angle(), 0.0);
        assert_eq!(session.highest_angle(), 0.0);
        assert_eq!(session.frame_count(), 1);
        assert_eq!(session.state(), SessionState::Accumulating);
    }

    #[test]
    fn test_leaning_frame() {
        let mut session = SessionAccumulator::new();
        let leaning = side(Some((100.0, 50.0)), Some((150.0, 150.0)));
        let feedback = process_frame(&mut session, &leaning);
        assert!((feedback.angle.unwrap() - 26.57).abs() < 0.01);

        let recorded = &session.frame_history()[0];
        assert!((recorded.angle - 26.57).abs() < 0.01);
        assert_eq!(recorded.knee, Some(Position2D::new(100.0, 250.0)));
    }

    #[test]
    fn test_missing_shoulder_or_hip_is_skipped() {
        let mut session = SessionAccumulator::new();
        for selected in [
            side(None, Some((1.0, 1.0))),
            side(Some((1.0, 1.0)), None),
            side(None, None),
        ] {
            let feedback = process_frame(&mut session, &selected);
            assert_eq!(feedback.status, StatusColor::Blue);
            assert_eq!(feedback.angle, None);
        }
        assert!(session.is_empty());
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_extremes_stay_ordered() {
        let mut session = SessionAccumulator::new();
        for degrees in [12.0, 3.0, 40.0, 27.5, 0.5, 33.0, 18.0] {
            process_frame(&mut session, &tilted(degrees));
            assert!(session.lowest_angle() <= session.highest_angle());
        }
        assert!((session.lowest_angle() - 0.5).abs() < 1e-9);
        assert!((session.highest_angle() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_excellent_session() {
        let mut session = SessionAccumulator::new();
        process_frame(&mut session, &tilted(30.0));
        process_frame(&mut session, &tilted(15.0));

        let verdict = evaluate_session(&mut session);
        assert_eq!(verdict.grade, FormGrade::Good);
        assert_eq!(verdict.status, StatusColor::Green);
        assert!(verdict.message.starts_with("Excellent squat form"));
        assert!((verdict.highest_angle.unwrap() - 30.0).abs() < 1e-9);
        assert_eq!(session.state(), SessionState::Evaluated);
    }

    #[test]
    fn test_poor_session() {
        // Highest 18 with lowest 25 cannot come from real frames; drive the table directly
        let (grade, message) = classify(18.0, 25.0);
        assert_eq!(grade, FormGrade::Bad);
        assert_eq!(grade.status(), StatusColor::Red);
        assert!(message.starts_with("Poor form"));
    }

    #[test]
    fn test_decision_table() {
        let cases = [
            (30.0, 22.0, FormGrade::Caution, "You're extending well"),
            (24.5, 20.0, FormGrade::Good, "Excellent squat form"),
            (24.0, 21.0, FormGrade::Caution, "You need to improve both"),
            (20.0, 20.0, FormGrade::Caution, "Moderate form"),
            (19.9, 20.1, FormGrade::Bad, "Poor form"),
            (10.0, 5.0, FormGrade::Bad, "Very poor form"),
        ];

        for (highest, lowest, grade, prefix) in cases {
            let (got_grade, message) = classify(highest, lowest);
            assert_eq!(got_grade, grade, "highest={highest} lowest={lowest}");
            assert!(message.starts_with(prefix), "{message}");
        }
    }

    #[test]
    fn test_empty_session_has_no_data() {
        let mut session = SessionAccumulator::new();
        let verdict = evaluate_session(&mut session);
        assert_eq!(verdict.grade, FormGrade::NoData);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.status, StatusColor::Gray);
        assert_eq!(verdict.message, "No squat data");
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_reset_then_evaluate_is_no_data() {
        let mut session = SessionAccumulator::new();
        process_frame(&mut session, &tilted(30.0));
        evaluate_session(&mut session);

        reset_session(&mut session);
        reset_session(&mut session);
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(evaluate_session(&mut session), FinalVerdict::no_data());
    }

    #[test]
    fn test_frames_after_evaluation_resume_accumulating() {
        let mut session = SessionAccumulator::new();
        process_frame(&mut session, &tilted(10.0));
        evaluate_session(&mut session);
        process_frame(&mut session, &tilted(28.0));

        assert_eq!(session.state(), SessionState::Accumulating);
        assert_eq!(session.frame_count(), 2);
    }
}
