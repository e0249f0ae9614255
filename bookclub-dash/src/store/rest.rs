//! REST record store client
//!
//! Talks to a PostgREST-style endpoint (`{base}/rest/v1/books`). The access
//! key is sent both as `apikey` and as a bearer token.

use async_trait::async_trait;
use bookclub_common::BookPick;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

use super::{RecordStore, BOOKS_TABLE, CONFLICT_KEY};
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("bookclub-dash/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the hosted record store
pub struct RestStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a client; both the endpoint and the key are required
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(bookclub_common::Error::Config(
                "Record store URL is empty".to_string(),
            )
            .into());
        }
        if api_key.trim().is_empty() {
            return Err(bookclub_common::Error::Config(
                "Record store access key is empty".to_string(),
            )
            .into());
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, BOOKS_TABLE)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// Turn a non-success response into `Error::Status`, otherwise read the body
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Status {
            service: "record store",
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[async_trait]
impl RecordStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn select_all(&self) -> Result<Vec<BookPick>> {
        let url = self.table_url();
        debug!(url = %url, "Selecting all book picks");

        let response = self
            .authorized(self.http_client.get(&url))
            .query(&[("select", "*"), ("order", "year.desc")])
            .send()
            .await?;

        let body = read_body(response).await?;
        let picks: Vec<BookPick> = serde_json::from_str(&body)?;

        debug!(count = picks.len(), "Fetched book picks");
        Ok(picks)
    }

    async fn upsert(&self, pick: &BookPick) -> Result<BookPick> {
        let url = self.table_url();
        debug!(url = %url, slot = %pick.slot(), "Upserting book pick");

        let response = self
            .authorized(self.http_client.post(&url))
            .query(&[("on_conflict", CONFLICT_KEY)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(pick)
            .send()
            .await?;

        let body = read_body(response).await?;
        let mut rows: Vec<BookPick> = serde_json::from_str(&body)?;

        if rows.is_empty() {
            return Err(Error::Store(format!(
                "Upsert for {} returned no row",
                pick.slot()
            )));
        }

        Ok(rows.swap_remove(0))
    }
}
