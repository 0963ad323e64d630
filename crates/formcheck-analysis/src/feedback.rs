//! Feedback values handed to the display layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named status tag the UI maps to a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Blue => "blue",
            StatusColor::Green => "green",
            StatusColor::Yellow => "yellow",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
            StatusColor::Gray => "gray",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient per-frame status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFeedback {
    pub message: String,
    pub status: StatusColor,
    /// Torso angle measured this frame, if the frame was usable
    pub angle: Option<f64>,
}

impl LiveFeedback {
    pub fn new(message: impl Into<String>, status: StatusColor) -> Self {
        Self {
            message: message.into(),
            status,
            angle: None,
        }
    }

    pub fn analyzing(angle: Option<f64>) -> Self {
        Self {
            angle,
            ..Self::new("Analyzing squat...", StatusColor::Blue)
        }
    }

    pub fn keypoints_unreliable() -> Self {
        Self::new("Required keypoints not detected reliably", StatusColor::Yellow)
    }
}

/// Quality band of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormGrade {
    NoData,
    Bad,
    Caution,
    Good,
}

impl FormGrade {
    pub fn status(&self) -> StatusColor {
        match self {
            FormGrade::NoData => StatusColor::Gray,
            FormGrade::Bad => StatusColor::Red,
            FormGrade::Caution => StatusColor::Yellow,
            FormGrade::Good => StatusColor::Green,
        }
    }

    /// Numeric score; 0 means nothing was measured
    pub fn score(&self) -> u8 {
        match self {
            FormGrade::NoData => 0,
            FormGrade::Bad => 1,
            FormGrade::Caution => 2,
            FormGrade::Good => 3,
        }
    }
}

/// End-of-session classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    pub grade: FormGrade,
    pub message: String,
    pub status: StatusColor,
    pub score: u8,
    pub highest_angle: Option<f64>,
    pub lowest_angle: Option<f64>,
}

impl FinalVerdict {
    pub fn no_data() -> Self {
        Self::graded(FormGrade::NoData, "No squat data", None, None)
    }

    pub fn graded(
        grade: FormGrade,
        message: impl Into<String>,
        highest_angle: Option<f64>,
        lowest_angle: Option<f64>,
    ) -> Self {
        Self {
            grade,
            message: message.into(),
            status: grade.status(),
            score: grade.score(),
            highest_angle,
            lowest_angle,
        }
    }
}

impl fmt::Display for FinalVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.highest_angle {
            Some(highest) => write!(
                f,
                "[{}] {} (highest angle {:.1}°)",
                self.status, self.message, highest
            ),
            None => write!(f, "[{}] {}", self.status, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_status_and_score() {
        assert_eq!(FormGrade::Good.status(), StatusColor::Green);
        assert_eq!(FormGrade::Bad.status(), StatusColor::Red);
        assert_eq!(FormGrade::NoData.score(), 0);
        assert!(FormGrade::Good > FormGrade::Caution);
    }

    #[test]
    fn test_verdict_display() {
        let verdict = FinalVerdict::graded(FormGrade::Good, "Nice", Some(30.04), Some(12.0));
        assert_eq!(verdict.to_string(), "[green] Nice (highest angle 30.0°)");
        assert_eq!(FinalVerdict::no_data().to_string(), "[gray] No squat data");
    }

    #[test]
    fn test_verdict_json_shape() {
        let json = serde_json::to_value(FinalVerdict::no_data()).unwrap();
        assert_eq!(json["status"], "gray");
        assert_eq!(json["score"], 0);
        assert!(json["highestAngle"].is_null());
    }
}
