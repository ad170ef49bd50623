use std::time::Duration;

use reqwest::{header, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const GENERATE_PATH: &str = "generate";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation endpoint unreachable")]
    EndpointUnreachable(#[source] reqwest::Error),

    #[error("generation endpoint returned status {status}")]
    EndpointError { status: StatusCode, body: String },

    #[error("malformed response from generation endpoint")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: 512,
            do_sample: true,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResult {
    pub generated_text: String,
}

/// Posts prompts to `{endpoint}/generate` on a text-generation server.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http_client: reqwest::Client,
    generate_url: Url,
}

impl GenerationClient {
    pub fn new(endpoint_url: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(http_client, endpoint_url)
    }

    pub fn with_http_client(
        http_client: reqwest::Client,
        endpoint_url: &Url,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            http_client,
            generate_url: generate_url(endpoint_url)?,
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(prompt);

        info!("Requesting generation from remote url = {}", self.generate_url);
        let response = self
            .http_client
            .post(self.generate_url.clone())
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::EndpointUnreachable(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GenerationError::EndpointUnreachable(e.without_url()))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!("Generation endpoint returned status {status}: {body}");
            return Err(GenerationError::EndpointError { status, body });
        }

        let GenerationResult { generated_text } =
            serde_json::from_slice(&body).map_err(|e| {
                error!("Malformed generation response: {e}");
                GenerationError::MalformedResponse(e)
            })?;

        info!("Completed generation: {} chars", generated_text.len());
        Ok(generated_text)
    }
}

fn generate_url(endpoint_url: &Url) -> anyhow::Result<Url> {
    let base = endpoint_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{GENERATE_PATH}"))?)
}
