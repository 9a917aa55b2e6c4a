//! Reqwest-backed remote user source.
//!
//! This adapter owns transport details only: endpoint resolution, timeout and
//! HTTP error mapping, and JSON decoding into raw records. Date normalisation
//! and field validation happen in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::warn;

use super::dto::RemoteUserDto;
use crate::domain::ports::{RawUserRecord, RemoteUserSource, RemoteUserSourceError};

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum RemoteUsersSetupError {
    /// The base URL cannot address the `users` collection.
    #[error("invalid remote users base URL: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The HTTP client could not be built.
    #[error("failed to build remote users HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Remote source issuing `GET {base}/users` against one REST resource.
pub struct RemoteUsersHttpSource {
    client: Client,
    endpoint: Url,
}

impl RemoteUsersHttpSource {
    /// Build an adapter for the resource rooted at `base_url`, with an
    /// explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL cannot be derived or the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, RemoteUsersSetupError> {
        let endpoint = users_endpoint(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Fully resolved collection URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn users_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    base.join("users")
}

#[async_trait]
impl RemoteUserSource for RemoteUsersHttpSource {
    async fn fetch_all(&self) -> Result<Vec<RawUserRecord>, RemoteUserSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_users(body.as_ref())
    }
}

/// Decode the payload array; items that do not match the record shape are
/// logged and skipped.
fn parse_users(body: &[u8]) -> Result<Vec<RawUserRecord>, RemoteUserSourceError> {
    let items: Vec<Value> = serde_json::from_slice(body).map_err(|error| {
        RemoteUserSourceError::decode(format!("invalid users JSON payload: {error}"))
    })?;
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RemoteUserDto>(item) {
            Ok(dto) => Some(RawUserRecord::from(dto)),
            Err(error) => {
                warn!(index, error = %error, "skipping undecodable remote user record");
                None
            }
        })
        .collect())
}

fn map_transport_error(error: reqwest::Error) -> RemoteUserSourceError {
    if error.is_timeout() {
        RemoteUserSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        RemoteUserSourceError::decode(error.to_string())
    } else {
        RemoteUserSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteUserSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    RemoteUserSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
