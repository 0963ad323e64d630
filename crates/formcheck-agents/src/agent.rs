//! Base agent trait and common types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Agent error types
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM inference error: {0}")]
    LlmError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt template error: {0}")]
    PromptError(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimit,
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::PromptError(e.to_string())
    }
}

impl From<formcheck_core::Error> for AgentError {
    fn from(e: formcheck_core::Error) -> Self {
        AgentError::PromptError(e.to_string())
    }
}

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name/identifier
    fn name(&self) -> &str;

    /// Process input and generate output
    async fn process(&self, input: &str) -> AgentResult<String>;

    /// Optional: validate input before processing
    fn validate_input(&self, input: &str) -> AgentResult<()> {
        if input.trim().is_empty() {
            Err(AgentError::InvalidInput("Empty input".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Agent configuration.
///
/// `model`, `temperature`, `max_tokens` and `top_p` are not interpreted
/// here; they are handed to the attached [`LanguageModel`] on every
/// request. `timeout_ms` bounds each request.
///
/// [`LanguageModel`]: crate::model::LanguageModel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model to use (e.g., "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Top-p sampling
    pub top_p: f32,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            max_tokens: 600,
            top_p: 0.9,
            timeout_ms: 30_000,
        }
    }
}

/// Agent response with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Agent that generated the response
    pub agent_name: String,
    /// Generated content
    pub content: String,
    /// Generation time in milliseconds
    pub generation_time_ms: u64,
    /// Model used, `None` for rule-based output
    pub model: Option<String>,
}

impl AgentResponse {
    pub fn new(agent_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            content: content.into(),
            generation_time_ms: 0,
            model: None,
        }
    }
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}ms, {})",
            self.agent_name,
            self.content,
            self.generation_time_ms,
            self.model.as_deref().unwrap_or("rules")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_default() {
        let config = AgentConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.temperature, 0.4);
    }

    #[test]
    fn test_agent_config_partial_deserialize() {
        let config: AgentConfig = serde_json::from_str(r#"{"model":"local-llm"}"#).unwrap();
        assert_eq!(config.model, "local-llm");
        assert_eq!(config.max_tokens, 600);
    }

    #[test]
    fn test_agent_response_display() {
        let response = AgentResponse {
            agent_name: "Coach".to_string(),
            content: "Sit back more".to_string(),
            generation_time_ms: 150,
            model: Some("test-model".to_string()),
        };

        let display = format!("{}", response);
        assert!(display.contains("Coach"));
        assert!(display.contains("Sit back more"));
        assert!(display.contains("test-model"));
    }
}
