//! Body side selection for profile-view measurements.
//!
//! A side-on camera sees one side of the body far better than the other.
//! Measurements use only the side whose joints are tracked most reliably.

use formcheck_core::{BodySide, Joint, KeypointDetection, Pose};
use serde::{Deserialize, Serialize};

/// Minimum confidence for a joint to count toward a side's score
pub const MIN_CONFIDENCE: f32 = 0.6;

/// The six limb joints of one body side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedSide {
    pub side: BodySide,
    pub shoulder: Option<KeypointDetection>,
    pub elbow: Option<KeypointDetection>,
    pub wrist: Option<KeypointDetection>,
    pub hip: Option<KeypointDetection>,
    pub knee: Option<KeypointDetection>,
    pub ankle: Option<KeypointDetection>,
}

impl SelectedSide {
    /// Collect one side's joints from a pose; missing joints stay `None`
    pub fn from_pose(pose: &Pose, side: BodySide) -> Self {
        let pick = |joint: Joint| pose.get(joint.keypoint(side)).copied();

        Self {
            side,
            shoulder: pick(Joint::Shoulder),
            elbow: pick(Joint::Elbow),
            wrist: pick(Joint::Wrist),
            hip: pick(Joint::Hip),
            knee: pick(Joint::Knee),
            ankle: pick(Joint::Ankle),
        }
    }

    pub fn get(&self, joint: Joint) -> Option<&KeypointDetection> {
        match joint {
            Joint::Shoulder => self.shoulder.as_ref(),
            Joint::Elbow => self.elbow.as_ref(),
            Joint::Wrist => self.wrist.as_ref(),
            Joint::Hip => self.hip.as_ref(),
            Joint::Knee => self.knee.as_ref(),
            Joint::Ankle => self.ankle.as_ref(),
        }
    }

    pub fn joints(&self) -> impl Iterator<Item = &KeypointDetection> {
        Joint::ALL.into_iter().filter_map(move |joint| self.get(joint))
    }

    /// Mean confidence over joints at or above [`MIN_CONFIDENCE`]; 0 if none qualify
    pub fn average_confidence(&self) -> f32 {
        let (sum, count) = self
            .joints()
            .filter(|kp| kp.confidence >= MIN_CONFIDENCE)
            .fold((0.0_f32, 0_u32), |(sum, count), kp| (sum + kp.confidence, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }
}

/// Pick the more reliably tracked side of the body.
///
/// Left wins ties. Returns `None` when neither side has a single joint at
/// or above [`MIN_CONFIDENCE`]; the frame cannot be evaluated.
pub fn select_side(pose: &Pose) -> Option<SelectedSide> {
    let left = SelectedSide::from_pose(pose, BodySide::Left);
    let right = SelectedSide::from_pose(pose, BodySide::Right);

    let left_avg = left.average_confidence();
    let right_avg = right.average_confidence();

    if left_avg >= right_avg && left_avg > 0.0 {
        Some(left)
    } else if right_avg > 0.0 {
        Some(right)
    } else {
        None
    }
}
