//! Geometric utilities for keypoint measurements.

use serde::{Deserialize, Serialize};

use crate::types::Position2D;

/// Angle in degrees between the `from -> to` segment and the image vertical.
///
/// `atan2(dx, dy)` measures deviation from vertical: 0 for a perfectly
/// upright segment, 90 for a horizontal one. The sign is discarded so
/// leaning toward either side reads the same.
pub fn angle_from_vertical(from: &Position2D, to: &Position2D) -> f64 {
    let d = from.displacement_to(to);
    d.x.atan2(d.y).to_degrees().abs()
}

/// Torso lean: shoulder-to-hip line against vertical, in degrees
pub fn torso_angle(shoulder: &Position2D, hip: &Position2D) -> f64 {
    angle_from_vertical(shoulder, hip)
}

/// Running minimum and maximum of an angle series.
///
/// Serialized with `null` for the unset sentinels, so an empty series
/// survives formats without infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExtremesRepr", into = "ExtremesRepr")]
pub struct AngleExtremes {
    pub lowest: f64,
    pub highest: f64,
}

impl AngleExtremes {
    /// Sentinel state: nothing observed yet
    pub fn new() -> Self {
        Self {
            lowest: f64::INFINITY,
            highest: f64::NEG_INFINITY,
        }
    }

    pub fn observe(&mut self, angle: f64) {
        self.lowest = self.lowest.min(angle);
        self.highest = self.highest.max(angle);
    }

    pub fn is_empty(&self) -> bool {
        self.lowest == f64::INFINITY || self.highest == f64::NEG_INFINITY
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn lowest(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.lowest)
    }

    pub fn highest(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.highest)
    }
}

impl Default for AngleExtremes {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct ExtremesRepr {
    lowest: Option<f64>,
    highest: Option<f64>,
}

impl From<AngleExtremes> for ExtremesRepr {
    fn from(extremes: AngleExtremes) -> Self {
        Self {
            lowest: extremes.lowest(),
            highest: extremes.highest(),
        }
    }
}

impl From<ExtremesRepr> for AngleExtremes {
    fn from(repr: ExtremesRepr) -> Self {
        match (repr.lowest, repr.highest) {
            (Some(lowest), Some(highest)) => Self { lowest, highest },
            _ => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_torso_is_zero() {
        let angle = torso_angle(
            &Position2D::new(100.0, 50.0),
            &Position2D::new(100.0, 150.0),
        );
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_leaning_torso() {
        let angle = torso_angle(
            &Position2D::new(100.0, 50.0),
            &Position2D::new(150.0, 150.0),
        );
        assert!((angle - 26.565).abs() < 1e-2);

        // Mirrored lean gives the same magnitude
        let mirrored = torso_angle(
            &Position2D::new(100.0, 50.0),
            &Position2D::new(50.0, 150.0),
        );
        assert!((angle - mirrored).abs() < 1e-10);
    }

    #[test]
    fn test_horizontal_segment() {
        let angle =
            angle_from_vertical(&Position2D::new(0.0, 0.0), &Position2D::new(10.0, 0.0));
        assert!((angle - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_extremes_tracking() {
        let mut extremes = AngleExtremes::new();
        assert!(extremes.is_empty());
        assert_eq!(extremes.lowest(), None);

        for angle in [12.0, 30.0, 5.0, 18.0] {
            extremes.observe(angle);
        }
        assert_eq!(extremes.lowest(), Some(5.0));
        assert_eq!(extremes.highest(), Some(30.0));

        extremes.reset();
        assert!(extremes.is_empty());
    }

    #[test]
    fn test_extremes_serde_roundtrip() {
        let empty = AngleExtremes::new();
        let json = serde_json::to_string(&empty).unwrap();
        assert_eq!(json, r#"{"lowest":null,"highest":null}"#);
        let back: AngleExtremes = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
        assert_eq!(back, empty);

        let mut seen = AngleExtremes::new();
        seen.observe(7.5);
        seen.observe(31.0);
        let json = serde_json::to_string(&seen).unwrap();
        let back: AngleExtremes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seen);
    }

    #[test]
    fn test_half_set_extremes_read_as_empty() {
        let back: AngleExtremes =
            serde_json::from_str(r#"{"lowest":3.0,"highest":null}"#).unwrap();
        assert!(back.is_empty());
    }
}
