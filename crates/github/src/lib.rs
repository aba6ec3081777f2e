pub mod jobs;
pub mod logs;
pub mod runs;

use std::{path::Path, time::Duration};

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use ci_watch_core::{
    WatchError,
    config::{USER_AGENT, WatchConfig},
};
use http::header;
use octocrab::{FromResponse, Octocrab};
use serde::Serialize;
use tokio::time::timeout;

/// Authenticated GitHub API client plus the watch configuration it serves.
pub struct GitHub {
    client: Octocrab,
    config: WatchConfig,
}

impl GitHub {
    /// Build a client from the configured credential file. Fails with
    /// `MissingCredential` before any network access when the file is absent.
    pub fn new(config: WatchConfig) -> Result<Self, WatchError> {
        let token = load_credential(&config.token_path)?;
        let client = Octocrab::builder()
            .personal_token(token)
            .add_header(header::USER_AGENT, USER_AGENT.to_string())
            .build()
            .context("Failed to create GitHub client")?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WatchConfig { &self.config }

    /// GET a JSON resource with the standard API deadline.
    pub(crate) async fn get_json<T, P>(&self, route: &str, parameters: Option<&P>) -> Result<T>
    where
        T: FromResponse,
        P: Serialize + ?Sized,
    {
        let deadline = self.config.timeouts.api();
        timeout(deadline, self.client.get(route, parameters))
            .await
            .map_err(|_| anyhow!("Request timed out after {}s: {route}", deadline.as_secs()))?
            .with_context(|| format!("Request failed: {route}"))
    }

    /// GET an opaque payload, following the redirect to blob storage, with
    /// the given deadline.
    pub(crate) async fn get_bytes(&self, route: &str, deadline: Duration) -> Result<Bytes> {
        let fetch = async {
            let response = self.client._get(route).await?;
            self.client.follow_location_to_data(response).await
        };
        timeout(deadline, fetch)
            .await
            .map_err(|_| anyhow!("Request timed out after {}s: {route}", deadline.as_secs()))?
            .with_context(|| format!("Request failed: {route}"))
    }
}

/// Read and trim the personal access token.
pub fn load_credential(path: &Path) -> Result<String, WatchError> {
    if !path.exists() {
        return Err(WatchError::MissingCredential(path.to_path_buf()));
    }
    let token = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credential file {}", path.display()))?;
    Ok(token.trim().to_string())
}
