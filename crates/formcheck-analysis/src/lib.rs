//! # FormCheck-Analysis
//!
//! Per-frame squat form analysis over pose keypoints.
//!
//! ## Pipeline
//!
//! ```text
//! Pose (17 keypoints)
//!     ↓
//! [Selector]  pick the better-tracked body side (confidence >= 0.6)
//!     ↓
//! [Evaluator] torso angle vs vertical → session lowest/highest
//!     ↓
//! LiveFeedback per frame, FinalVerdict at session end
//! ```
//!
//! The session is an explicit value owned by the caller. Frames are fed in
//! one at a time by an external driver; nothing here schedules work or
//! blocks.

pub mod analyzer;
pub mod evaluator;
pub mod exercise;
pub mod feedback;
pub mod selector;
pub mod session;

pub use analyzer::*;
pub use evaluator::*;
pub use exercise::*;
pub use feedback::*;
pub use selector::*;
pub use session::*;
