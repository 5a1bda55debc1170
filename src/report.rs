//! Per-species lookup outcome and its report line.
use crate::error::Result;
use crate::inaturalist::{InatClient, TaxonId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Vision {
        species: String,
        taxon_id: TaxonId,
        vision: Option<bool>,
    },
    NoObservations {
        species: String,
    },
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupResult::Vision {
                species, vision, ..
            } => write!(f, "{} vision: {}", species, vision_label(*vision)),
            LookupResult::NoObservations { species } => {
                write!(f, "{}: no observations", species)
            }
        }
    }
}

impl LookupResult {
    pub fn taxon_id(&self) -> Option<TaxonId> {
        match self {
            LookupResult::Vision { taxon_id, .. } => Some(*taxon_id),
            LookupResult::NoObservations { .. } => None,
        }
    }
}

fn vision_label(vision: Option<bool>) -> &'static str {
    match vision {
        Some(true) => "True",
        Some(false) => "False",
        None => "None",
    }
}

/// Resolves `species` to a taxon and, if one exists, fetches its vision flag.
pub async fn lookup_species(client: &InatClient, species: &str) -> Result<LookupResult> {
    let species = species.to_string();
    match client.resolve_taxon_id(&species).await? {
        Some(taxon_id) => {
            let vision = client.fetch_vision(taxon_id).await?;
            Ok(LookupResult::Vision {
                species,
                taxon_id,
                vision,
            })
        }
        None => Ok(LookupResult::NoObservations { species }),
    }
}
