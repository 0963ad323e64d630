//! Error types for the FormCheck system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown keypoint part: {0}")]
    UnknownPart(String),

    #[error("Non-finite position for {part}: ({x}, {y})")]
    NonFinitePosition { part: String, x: f64, y: f64 },

    #[error("Confidence out of range for {part}: {confidence}")]
    ConfidenceRange { part: String, confidence: f32 },

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
