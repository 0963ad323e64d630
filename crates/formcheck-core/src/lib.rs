//! # FormCheck-Core
//!
//! Core types and utilities for the FormCheck exercise-form analysis
//! system: typed pose keypoints, 2D geometry and the shared error type.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
