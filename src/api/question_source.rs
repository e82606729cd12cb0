use std::path::PathBuf;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::models::error::QuestionLoadError;

/// Where the question JSON lives: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSource {
    File(PathBuf),
    Http(String),
}

impl QuestionSource {
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        if location.starts_with("http://") || location.starts_with("https://") {
            QuestionSource::Http(location)
        } else {
            QuestionSource::File(PathBuf::from(location))
        }
    }

    /// Fetches the raw records. Anything but a top level JSON array is an
    /// error; the records themselves are not checked here.
    pub async fn fetch(&self, client: &Client) -> Result<Vec<Value>, QuestionLoadError> {
        let payload: Value = match self {
            QuestionSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                serde_json::from_slice(&bytes)?
            }
            QuestionSource::Http(url) => {
                let response = client.get(url).send().await?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or("No body".into());
                    error!("Question source request failed: {} - {}", status, body);
                    return Err(QuestionLoadError::Api(status, body));
                }

                response.json().await?
            }
        };

        match payload {
            Value::Array(records) => {
                debug!("Fetched {} raw question records", records.len());
                Ok(records)
            }
            _ => Err(QuestionLoadError::NotAnArray),
        }
    }
}
