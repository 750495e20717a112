use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::schedule::{ApiResult, RawSalmonEntry, ScheduleBucket};

/// Base URL of the schedule API, fixed for the lifetime of the process.
pub const API_BASE_URL: &str = "https://spla2.yuu26.com";

/// Identifying header sent with every request, as the API operator asks.
const USER_AGENT_VALUE: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (+",
    env!("CARGO_PKG_HOMEPAGE"),
    ")"
);

/// Errors surfaced by the schedule API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("schedule API returned HTTP {0}")]
    Status(u16),
    #[error("failed to reach schedule API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected schedule API payload: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ApiError {
    /// Status code of the non-200 branch, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Read-only client for the spla2 schedule API.
/// One instance is built at startup and shared by all responders.
pub struct ScheduleClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create schedule API client")?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Current and upcoming salmon-run rotations.
    pub async fn coop_schedule(&self) -> Result<Vec<RawSalmonEntry>, ApiError> {
        self.fetch("/coop/schedule").await
    }

    /// The three versus-mode schedule buckets.
    pub async fn battle_schedule(&self) -> Result<ScheduleBucket, ApiError> {
        self.fetch("/schedule").await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let wrapper: ApiResult<T> = serde_json::from_str(&body).map_err(ApiError::Malformed)?;
        Ok(wrapper.result)
    }
}
