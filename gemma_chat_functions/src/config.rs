use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub mod env {
    pub const ENDPOINT_URL: &str = "ENDPOINT_URL";
    pub const GENERATION_TIMEOUT_MS: &str = "GENERATION_TIMEOUT_MS";
}

pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint_url: Url,
    pub generation_timeout: Duration,
}

impl ChatConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let endpoint_url = lookup(env::ENDPOINT_URL)
            .filter(|x| !x.trim().is_empty())
            .with_context(|| format!("{} environment variable must be set", env::ENDPOINT_URL))?;
        let endpoint_url = Url::parse(endpoint_url.trim())
            .with_context(|| format!("{} is not a valid url", env::ENDPOINT_URL))?;

        let timeout_ms = lookup(env::GENERATION_TIMEOUT_MS)
            .and_then(|x| x.parse::<u64>().ok())
            .filter(|&ms| ms > 0);
        let generation_timeout =
            Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_GENERATION_TIMEOUT_MS));

        Ok(Self {
            endpoint_url,
            generation_timeout,
        })
    }
}

/// Region segment of a lambda function arn (`arn:aws:lambda:{region}:...`).
pub fn region_from_arn(arn: &str) -> &str {
    arn.find("arn:aws:lambda:")
        .map(|idx| &arn[idx + "arn:aws:lambda:".len()..])
        .and_then(|rest| rest.split_once(':'))
        .map(|(region, _)| region)
        .filter(|region| !region.is_empty())
        .unwrap_or(DEFAULT_REGION)
}
