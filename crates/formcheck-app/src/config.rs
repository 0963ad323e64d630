//! Application configuration.

use formcheck_agents::AgentConfig;
use formcheck_analysis::{Exercise, DEFAULT_SAMPLING_RATE};
use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Form analysis settings
    pub analysis: AnalysisConfig,

    /// Narrative coach settings
    pub coach: CoachConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exercise analyzed when none is given on the command line
    pub exercise: Exercise,

    /// Keep every Nth frame in the session summary
    pub summary_sampling_rate: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Generate coaching commentary after each session
    pub enabled: bool,

    /// Request timeout plus the generation settings passed through to the
    /// attached language model client
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exercise: Exercise::Squat,
            summary_sampling_rate: DEFAULT_SAMPLING_RATE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file, with `FORMCHECK__*` environment overrides
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("FORMCHECK")
            .prefix_separator("__")
            .separator("__")
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        if self.analysis.summary_sampling_rate == 0 {
            return Err(config::ConfigError::Message(
                "analysis.summary_sampling_rate must be at least 1".to_string(),
            ));
        }
        if self.coach.agent.timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "coach.agent.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}
