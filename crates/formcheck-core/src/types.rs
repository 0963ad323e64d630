//! Fundamental types for the FormCheck system.

use chrono::{DateTime, Utc};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier for one exercise session (reset/upload to video end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// 2D position in the pixel space of the analysed frame.
///
/// Image coordinates: `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Displacement from `self` to `other`
    pub fn displacement_to(&self, other: &Self) -> Vector2<f64> {
        other.to_vector() - self.to_vector()
    }
}

/// 17-joint skeletal keypoint definition (COCO / PoseNet order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Keypoint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Keypoint {
    pub const COUNT: usize = 17;

    pub const ALL: [Keypoint; Keypoint::COUNT] = [
        Keypoint::Nose,
        Keypoint::LeftEye,
        Keypoint::RightEye,
        Keypoint::LeftEar,
        Keypoint::RightEar,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
        Keypoint::LeftAnkle,
        Keypoint::RightAnkle,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Part name as emitted by the pose model (`leftShoulder`, ...)
    pub fn part_name(&self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "leftEye",
            Keypoint::RightEye => "rightEye",
            Keypoint::LeftEar => "leftEar",
            Keypoint::RightEar => "rightEar",
            Keypoint::LeftShoulder => "leftShoulder",
            Keypoint::RightShoulder => "rightShoulder",
            Keypoint::LeftElbow => "leftElbow",
            Keypoint::RightElbow => "rightElbow",
            Keypoint::LeftWrist => "leftWrist",
            Keypoint::RightWrist => "rightWrist",
            Keypoint::LeftHip => "leftHip",
            Keypoint::RightHip => "rightHip",
            Keypoint::LeftKnee => "leftKnee",
            Keypoint::RightKnee => "rightKnee",
            Keypoint::LeftAnkle => "leftAnkle",
            Keypoint::RightAnkle => "rightAnkle",
        }
    }

    /// Exact-match lookup of a model part name
    pub fn from_part_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kp| kp.part_name() == name)
    }
}

impl FromStr for Keypoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_part_name(s).ok_or_else(|| Error::UnknownPart(s.to_string()))
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

/// Body side used for single-side (profile view) measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    Left,
    Right,
}

impl fmt::Display for BodySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySide::Left => f.write_str("left"),
            BodySide::Right => f.write_str("right"),
        }
    }
}

/// Limb joints that exist once per body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Joint {
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

impl Joint {
    pub const ALL: [Joint; 6] = [
        Joint::Shoulder,
        Joint::Elbow,
        Joint::Wrist,
        Joint::Hip,
        Joint::Knee,
        Joint::Ankle,
    ];

    /// The concrete keypoint for this joint on the given side
    pub fn keypoint(&self, side: BodySide) -> Keypoint {
        match (self, side) {
            (Joint::Shoulder, BodySide::Left) => Keypoint::LeftShoulder,
            (Joint::Shoulder, BodySide::Right) => Keypoint::RightShoulder,
            (Joint::Elbow, BodySide::Left) => Keypoint::LeftElbow,
            (Joint::Elbow, BodySide::Right) => Keypoint::RightElbow,
            (Joint::Wrist, BodySide::Left) => Keypoint::LeftWrist,
            (Joint::Wrist, BodySide::Right) => Keypoint::RightWrist,
            (Joint::Hip, BodySide::Left) => Keypoint::LeftHip,
            (Joint::Hip, BodySide::Right) => Keypoint::RightHip,
            (Joint::Knee, BodySide::Left) => Keypoint::LeftKnee,
            (Joint::Knee, BodySide::Right) => Keypoint::RightKnee,
            (Joint::Ankle, BodySide::Left) => Keypoint::LeftAnkle,
            (Joint::Ankle, BodySide::Right) => Keypoint::RightAnkle,
        }
    }
}

/// Keypoint detection with confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointDetection {
    pub keypoint: Keypoint,
    pub position: Position2D,
    pub confidence: f32,
}

impl KeypointDetection {
    pub fn new(keypoint: Keypoint, position: Position2D, confidence: f32) -> Self {
        Self {
            keypoint,
            position,
            confidence,
        }
    }
}

/// Keypoint exactly as the pose model reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    pub part: String,
    pub position: Position2D,
    pub score: f32,
}

impl TryFrom<&RawKeypoint> for KeypointDetection {
    type Error = Error;

    fn try_from(raw: &RawKeypoint) -> Result<Self> {
        let keypoint: Keypoint = raw.part.parse()?;

        if !raw.position.is_finite() {
            return Err(Error::NonFinitePosition {
                part: raw.part.clone(),
                x: raw.position.x,
                y: raw.position.y,
            });
        }

        if !(0.0..=1.0).contains(&raw.score) {
            return Err(Error::ConfidenceRange {
                part: raw.part.clone(),
                confidence: raw.score,
            });
        }

        Ok(Self::new(keypoint, raw.position, raw.score))
    }
}

/// Single-person pose as returned by the model for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPose {
    #[serde(default)]
    pub score: Option<f32>,
    pub keypoints: Vec<RawKeypoint>,
}

/// Validated pose: one optional detection per keypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: [Option<KeypointDetection>; Keypoint::COUNT],
    pub overall_confidence: Option<f32>,
}

impl Pose {
    pub fn empty() -> Self {
        Self {
            keypoints: [None; Keypoint::COUNT],
            overall_confidence: None,
        }
    }

    /// Build from detections; the first detection of a keypoint wins
    pub fn from_detections<I>(detections: I) -> Self
    where
        I: IntoIterator<Item = KeypointDetection>,
    {
        let mut pose = Self::empty();
        for detection in detections {
            let slot = &mut pose.keypoints[detection.keypoint.index()];
            if slot.is_none() {
                *slot = Some(detection);
            }
        }
        pose
    }

    /// Validate raw model output at the ingestion boundary
    pub fn from_raw(raw: &RawPose) -> Result<Self> {
        let detections = raw
            .keypoints
            .iter()
            .map(KeypointDetection::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut pose = Self::from_detections(detections);
        pose.overall_confidence = raw.score;
        Ok(pose)
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<&KeypointDetection> {
        self.keypoints[keypoint.index()].as_ref()
    }

    pub fn detected_count(&self) -> usize {
        self.keypoints.iter().flatten().count()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::empty()
    }
}
