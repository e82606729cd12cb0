use core::fmt;
use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Runtime {
    Dev,
    Prod,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runtime::Dev => write!(f, "development"),
            Runtime::Prod => write!(f, "production"),
        }
    }
}

impl From<String> for Runtime {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DEVELOPMENT" => Runtime::Dev,
            "PRODUCTION" => Runtime::Prod,
            _ => Runtime::Prod,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub quiz: QuizConfig,
}

fn default_question_source() -> String {
    "questions.json".into()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizConfig {
    #[serde(default = "default_question_source")]
    pub question_source: String,
    pub submit_endpoint: String,
    /// Extra `form-name` field for hosts that route form posts by name
    #[serde(default)]
    pub form_name: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let runtime: Runtime = env::var("ENVIRONMENT")
            .map(Runtime::from)
            .unwrap_or(Runtime::Dev);

        let config: AppConfig = Config::builder()
            .add_source(File::with_name(&format!("src/config/{}.toml", runtime)))
            .add_source(Environment::with_prefix("QUIZ").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!("Loaded {} config: {:?}", runtime, config);

        Ok(config)
    }
}
