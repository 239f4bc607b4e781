use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use lineup_core::{SearchId, SearchPhase, StatusSnapshot};

pub type ChannelId = i64;

/// Wire form of `GET /api/search_status/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub channels_found: u64,
    pub valid_channels: u64,
    #[serde(default)]
    pub title: Option<String>,
}

impl StatusReport {
    /// Lifts the raw report into the presentation snapshot the core maps
    /// onto the page.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            phase: SearchPhase::from_wire(&self.status),
            channels_found: self.channels_found,
            valid_channels: self.valid_channels,
            title: self.title.clone(),
        }
    }
}

/// Wire form of `GET /api/test_channel/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestReport {
    pub status: String,
}

impl TestReport {
    /// The server acknowledges a test request with `"testing"`; the actual
    /// result arrives out of band.
    pub fn accepted(&self) -> bool {
        self.status == "testing"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedBody => write!(f, "malformed body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The two read-only endpoints the watch client depends on.
#[async_trait::async_trait]
pub trait StatusApi: Send + Sync {
    async fn search_status(&self, id: SearchId) -> Result<StatusReport, ApiError>;
    async fn test_channel(&self, id: ChannelId) -> Result<TestReport, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// reqwest-backed implementation talking to a channel manager instance.
#[derive(Debug, Clone)]
pub struct RestClient {
    base: reqwest::Url,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: &str, settings: ClientSettings) -> Result<Self, ApiError> {
        let base = reqwest::Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl StatusApi for RestClient {
    async fn search_status(&self, id: SearchId) -> Result<StatusReport, ApiError> {
        self.get_json(&format!("api/search_status/{id}")).await
    }

    async fn test_channel(&self, id: ChannelId) -> Result<TestReport, ApiError> {
        self.get_json(&format!("api/test_channel/{id}")).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::MalformedBody, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
