use super::{InatClient, TaxonId, required_nullable};
use crate::error::{CrateError, Result};
use log::{debug, info};
use serde::Deserialize;
use urlencoding::encode;

#[derive(Debug, Deserialize)]
struct ObservationSearch {
    total_results: u64,
    results: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(deserialize_with = "required_nullable")]
    taxon: Option<ObservationTaxon>,
}

#[derive(Debug, Deserialize)]
struct ObservationTaxon {
    #[serde(deserialize_with = "required_nullable")]
    min_species_taxon_id: Option<TaxonId>,
}

impl InatClient {
    /// Looks up the species-level taxon of the most recent observation filed under `species`.
    ///
    /// Returns `Ok(None)` when there are no observations or the search did not
    /// succeed.
    pub async fn resolve_taxon_id(&self, species: &str) -> Result<Option<TaxonId>> {
        let url = format!(
            "{}/observations?taxon_id=&taxon_name={}&per_page=1&order=desc&order_by=created_at",
            self.base_url,
            encode(species)
        );
        info!("Searching observations for {}", species);

        let Some(response) = self.get_json(&url).await? else {
            return Ok(None);
        };
        let search: ObservationSearch = response
            .json()
            .await
            .map_err(CrateError::ApiJsonDecodeError)?;
        search.first_taxon_id(species)
    }
}

impl ObservationSearch {
    fn first_taxon_id(&self, species: &str) -> Result<Option<TaxonId>> {
        if self.total_results == 0 {
            return Ok(None);
        }
        let first = self.results.first().ok_or_else(|| {
            CrateError::MalformedResponse(format!(
                "{} observations reported for {} but no results returned",
                self.total_results, species
            ))
        })?;
        let taxon_id = first.taxon.as_ref().and_then(|t| t.min_species_taxon_id);
        if taxon_id.is_none() {
            debug!("Latest observation of {} has no species-level taxon", species);
        }
        Ok(taxon_id)
    }
}
