//! Google Books volumes search client
//!
//! `GET {base}/books/v1/volumes?q=<query>&maxResults=1`, no authentication.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CoverSource, ImageLinks};
use crate::error::{Error, Result};

pub const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com";

const USER_AGENT: &str = concat!("bookclub-dash/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    image_links: Option<ImageLinks>,
}

/// Image links of the first volume in a search response body
fn first_image_links(body: &str) -> Result<Option<ImageLinks>> {
    let response: VolumesResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .next()
        .and_then(|volume| volume.volume_info)
        .and_then(|info| info.image_links))
}

pub struct GoogleBooksClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn volumes_url(&self) -> String {
        format!("{}/books/v1/volumes", self.base_url)
    }
}

#[async_trait]
impl CoverSource for GoogleBooksClient {
    async fn search(&self, query: &str) -> Result<Option<ImageLinks>> {
        let url = self.volumes_url();
        debug!(query = %query, "Querying Google Books");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("maxResults", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                service: "Google Books",
                status: status.as_u16(),
                body,
            });
        }

        first_image_links(&body)
    }
}
