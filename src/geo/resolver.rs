//! External geocoding adapter.
//!
//! # Responsibilities
//! - Synthesize a "hospitals near {location}" query
//! - Call the geocoder's search endpoint with a bounded timeout
//! - Map results to facilities; substitute the fallback list on failure

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GeocoderConfig;
use crate::observability::metrics;

/// Rating placeholder: the geocoder supplies no rating data.
const RATING_UNKNOWN: &str = "N/A";

/// A nearby medical facility candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub rating: String,
}

/// One result row from the geocoder's search endpoint.
#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
}

/// Adapter for the external geocoding service.
pub struct GeoResolver {
    client: reqwest::Client,
    base_url: String,
    max_results: u32,
}

impl GeoResolver {
    /// Build the resolver from configuration.
    ///
    /// The client timeout bounds the only high-latency call in the request
    /// path.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
        })
    }

    /// Resolve up to `max_results` facilities near the given location.
    ///
    /// Lookup failures are logged at WARN and replaced by the fixed fallback
    /// list; they never propagate. A successful lookup with no candidates
    /// returns an empty list.
    pub async fn nearby_facilities(&self, location: &str) -> Vec<Facility> {
        match self.search(location).await {
            Ok(places) => places.into_iter().map(to_facility).collect(),
            Err(error) => {
                tracing::warn!(
                    location = %location,
                    error = %error,
                    "Geocoder lookup failed, serving fallback facilities"
                );
                metrics::record_geocoder_fallback();
                fallback_facilities(location)
            }
        }
    }

    async fn search(&self, location: &str) -> Result<Vec<Place>, reqwest::Error> {
        let query = format!("hospitals near {location}");
        let limit = self.max_results.to_string();

        self.client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// The first comma-delimited segment of the address doubles as the name.
fn to_facility(place: Place) -> Facility {
    let name = place
        .display_name
        .split(',')
        .next()
        .unwrap_or_default()
        .to_string();
    Facility {
        name,
        address: place.display_name,
        rating: RATING_UNKNOWN.to_string(),
    }
}

/// Fixed substitute facility data for failed lookups.
fn fallback_facilities(location: &str) -> Vec<Facility> {
    vec![
        Facility {
            name: "City General Hospital".to_string(),
            address: format!("Default Hospital near {location}"),
            rating: RATING_UNKNOWN.to_string(),
        },
        Facility {
            name: "Community Health Clinic".to_string(),
            address: format!("Demo Clinic near {location}"),
            rating: RATING_UNKNOWN.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_name_is_first_address_segment() {
        let facility = to_facility(Place {
            display_name: "St. Mary Hospital, 12 Main St, Springfield".to_string(),
        });
        assert_eq!(facility.name, "St. Mary Hospital");
        assert_eq!(facility.address, "St. Mary Hospital, 12 Main St, Springfield");
        assert_eq!(facility.rating, "N/A");
    }

    #[test]
    fn single_segment_address_is_its_own_name() {
        let facility = to_facility(Place {
            display_name: "County Clinic".to_string(),
        });
        assert_eq!(facility.name, "County Clinic");
    }

    #[test]
    fn fallback_has_two_entries_referencing_location() {
        let facilities = fallback_facilities("Springfield");
        assert_eq!(facilities.len(), 2);
        for facility in &facilities {
            assert!(facility.address.contains("Springfield"));
            assert_eq!(facility.rating, "N/A");
        }
    }
}
