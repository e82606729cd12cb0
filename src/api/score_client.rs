use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use crate::models::error::SubmissionError;

#[derive(Debug, Serialize)]
pub struct ScoreForm<'a> {
    #[serde(rename = "form-name", skip_serializing_if = "Option::is_none")]
    pub form_name: Option<&'a str>,
    pub nombre: &'a str,
    pub puntaje: String,
}

#[derive(Debug, Clone)]
pub struct ScoreClient {
    endpoint: String,
    form_name: Option<String>,
}

impl ScoreClient {
    pub fn new(endpoint: impl Into<String>, form_name: Option<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint,
            form_name,
        }
    }

    /// Posts the final score as an url-encoded form. Any non 2xx answer
    /// counts as a failed submission.
    pub async fn submit_score(
        &self,
        client: &Client,
        name: &str,
        score: u64,
    ) -> Result<(), SubmissionError> {
        let form = ScoreForm {
            form_name: self.form_name.as_deref(),
            nombre: name,
            puntaje: score.to_string(),
        };

        let response = client.post(&self.endpoint).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or("No body".into());
            error!("Score submission failed: {} - {}", status, body);
            return Err(SubmissionError::Api(status, body));
        }

        debug!("Score {} submitted for {}", score, name);
        Ok(())
    }
}
