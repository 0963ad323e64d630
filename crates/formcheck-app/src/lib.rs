//! # FormCheck-App
//!
//! Outer driver for the FormCheck analysis crates: configuration loading
//! and replay of recorded pose-model output.

pub mod config;
pub mod replay;

pub use config::*;
pub use replay::*;
