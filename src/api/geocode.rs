//! Address-to-coordinates lookup against the Google geocoding endpoint.
//!
//! Thin request/response wrapper used by the add/edit place screens to fill
//! in map coordinates from a typed address.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::Coordinates;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct Geocoder {
    client: Client,
    api_key: String,
}

impl Geocoder {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Resolve a free-text address to map coordinates.
    pub async fn coordinates_for_address(&self, address: &str) -> Result<Coordinates> {
        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
            .context("Failed to send geocoding request")?;

        let parsed: GeocodeResponse = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        if parsed.status != "OK" {
            anyhow::bail!("Geocoding failed with status {}", parsed.status);
        }

        let location = parsed
            .results
            .first()
            .map(|r| &r.geometry.location)
            .context("Geocoding response contained no results")?;

        debug!(lat = location.lat, lng = location.lng, "Address resolved");
        Ok(Coordinates {
            latitude: location.lat,
            longitude: location.lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_google_geocode_response() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 48.8566, "lng": 2.3522}}}
            ]
        }"#;

        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results[0].geometry.location.lat, 48.8566);
    }

    #[test]
    fn parses_zero_results() {
        let json = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "ZERO_RESULTS");
        assert!(parsed.results.is_empty());
    }
}
