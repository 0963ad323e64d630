//! Language model seam.
//!
//! The hosted model client lives outside this workspace; it plugs in by
//! implementing [`LanguageModel`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::agent::{AgentConfig, AgentResult};

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier reported in responses
    fn id(&self) -> &str;

    /// Complete a single system + user prompt pair.
    ///
    /// `config` carries the generation settings (model name, temperature,
    /// token and nucleus limits) the client should request.
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        config: &AgentConfig,
    ) -> AgentResult<String>;
}

pub type SharedModel = Arc<dyn LanguageModel>;

/// Fixed-reply model for tests and offline runs
#[derive(Debug, Clone)]
pub struct StaticModel {
    reply: String,
}

impl StaticModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[async_trait]
impl LanguageModel for StaticModel {
    fn id(&self) -> &str {
        "static"
    }

    async fn complete(
        &self,
        _system: &str,
        _prompt: &str,
        _config: &AgentConfig,
    ) -> AgentResult<String> {
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_model() {
        let model: SharedModel = Arc::new(StaticModel::new("<p>ok</p>"));
        let reply = model.complete("sys", "prompt", &AgentConfig::default()).await.unwrap();
        assert_eq!(reply, "<p>ok</p>");
        assert_eq!(model.id(), "static");
    }
}
