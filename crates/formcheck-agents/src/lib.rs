//! # FormCheck-Agents
//!
//! Optional narrative coaching for finished squat sessions.
//!
//! ## Flow
//!
//! ```text
//! SessionSummary + FinalVerdict
//!     ↓
//! [Coach Agent] ── prompt ──> LanguageModel (hosted, optional)
//!     ↓
//! Coaching commentary (plain text + HTML)
//! ```
//!
//! The coach never feeds back into the numeric verdict. When no model is
//! configured it falls back to rule-based commentary built from the session
//! extremes; when the model fails the error is returned for the caller to
//! report.

pub mod agent;
pub mod coach;
pub mod model;
pub mod prompts;

pub use agent::*;
pub use coach::*;
pub use model::*;
pub use prompts::*;
