//! Thin client for the two iNaturalist endpoints the audit needs.
pub mod backoff;
pub mod observations;
pub mod taxa;

use crate::error::{CrateError, Result};
use backoff::{Backoff, Retried, send_with_backoff};
use log::warn;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Deserializer};

pub const INATURALIST_API_URL: &str = "https://api.inaturalist.org/v1";
pub const USER_AGENT: &str = concat!("wonder-vision/", env!("CARGO_PKG_VERSION"));

/// Numeric taxon identifier assigned by iNaturalist.
pub type TaxonId = u64;

pub struct InatClient {
    http: Client,
    base_url: String,
    backoff: Backoff,
}

impl InatClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(INATURALIST_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CrateError::ApiRequestError)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            backoff: Backoff::default(),
        })
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// GETs `url` as JSON, retrying on 429. Returns `None` for any final non-200 status.
    async fn get_json(&self, url: &str) -> Result<Option<Response>> {
        let retried: Retried<Response> = send_with_backoff(&self.backoff, || async {
            self.http
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(CrateError::ApiRequestError)
        })
        .await?;

        if retried.still_rate_limited() {
            warn!(
                "Still rate limited after {} requests and {:?} of waiting, giving up on {}",
                retried.attempts, retried.waited, url
            );
        }

        let status = retried.response.status();
        if status != StatusCode::OK {
            warn!("Request failed with status code: {}", status.as_u16());
            return Ok(None);
        }
        Ok(Some(retried.response))
    }
}

/// Deserializes a field that must be present but may be `null`.
fn required_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
