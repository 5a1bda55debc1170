use super::{InatClient, TaxonId, required_nullable};
use crate::error::{CrateError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TaxonDetail {
    results: Vec<TaxonRecord>,
}

#[derive(Debug, Deserialize)]
struct TaxonRecord {
    #[serde(deserialize_with = "required_nullable")]
    vision: Option<bool>,
}

impl InatClient {
    /// Fetches whether the computer-vision model covers `taxon_id`.
    pub async fn fetch_vision(&self, taxon_id: TaxonId) -> Result<Option<bool>> {
        let url = format!("{}/taxa/{}", self.base_url, taxon_id);

        let Some(response) = self.get_json(&url).await? else {
            return Ok(None);
        };
        let detail: TaxonDetail = response
            .json()
            .await
            .map_err(CrateError::ApiJsonDecodeError)?;
        let record = detail.results.first().ok_or_else(|| {
            CrateError::MalformedResponse(format!("taxon {} returned no results", taxon_id))
        })?;
        Ok(record.vision)
    }
}
