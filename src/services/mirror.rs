//! Best-effort copy of committed records to an external REST data service.
//!
//! The mirror runs after the local commit has succeeded. Its outcome never
//! changes the response returned to the caller, and there is no retry or
//! reconciliation: a failed mirror write leaves the remote copy behind the
//! local database until someone replays it.
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("mirror request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("mirror rejected write with status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Clone, Debug)]
pub struct Mirror {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Mirror {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, MirrorError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// REST endpoint receiving inserts for `table`.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<(), MirrorError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Status(status));
        }
        Ok(())
    }

    /// Mirrors `record` and logs the outcome instead of returning it.
    pub async fn forward<T: Serialize + ?Sized>(&self, table: &str, record: &T) {
        match self.insert(table, record).await {
            Ok(()) => log::debug!("Mirrored write to {}", table),
            Err(e) => log::error!("Failed to mirror write to {}: {}", table, e),
        }
    }
}
