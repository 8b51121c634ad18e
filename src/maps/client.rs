//! Maps REST client (nearby search, place details, directions)

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::*;
use super::PlacesProvider;
use crate::config::MapsConfig;
use crate::error::{Error, Result};

/// HTTP client for the maps platform
#[derive(Clone)]
pub struct MapsClient {
    client: Client,
    config: MapsConfig,
}

impl MapsClient {
    /// Create a new maps client
    pub fn new(config: MapsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("riddlequest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MapsClient { client, config })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);

        debug!("Maps request: {} {:?}", endpoint, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.config.api_key.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamUnavailable(format!(
                "Maps API error ({}) on {}: {}",
                status, endpoint, error_text
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Map the API's `status` field onto our error classes.
fn check_status(endpoint: &str, status: &str, error_message: Option<&str>) -> Result<()> {
    let detail = error_message.unwrap_or(status);
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "NOT_FOUND" => Err(Error::NotFound(format!("{}: {}", endpoint, detail))),
        "INVALID_REQUEST" => Err(Error::InvalidInput(format!("{}: {}", endpoint, detail))),
        "REQUEST_DENIED" => Err(Error::Unauthorized(format!("{}: {}", endpoint, detail))),
        _ => {
            warn!("Maps {} returned status {}", endpoint, status);
            Err(Error::UpstreamUnavailable(format!("{}: {}", endpoint, detail)))
        }
    }
}

#[async_trait]
impl PlacesProvider for MapsClient {
    async fn nearby_search(&self, search: &NearbySearch) -> Result<Vec<PlaceResult>> {
        let mut params = vec![
            ("location", search.location.clone()),
            ("radius", search.radius.to_string()),
        ];
        if let Some(ref keyword) = search.keyword {
            params.push(("keyword", keyword.clone()));
        }

        let body: NearbySearchResponse = self.get("place/nearbysearch/json", &params).await?;
        check_status("nearbysearch", &body.status, body.error_message.as_deref())?;

        Ok(body.results)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let params = [("place_id", place_id.to_string())];

        let body: PlaceDetailsResponse = self.get("place/details/json", &params).await?;
        check_status("details", &body.status, body.error_message.as_deref())?;

        Ok(body.result.unwrap_or_default())
    }

    async fn directions(&self, origin: &str, destination: &str) -> Result<Vec<Route>> {
        let params = [
            ("origin", format!("place_id:{}", origin)),
            ("destination", format!("place_id:{}", destination)),
        ];

        let body: DirectionsResponse = self.get("directions/json", &params).await?;
        check_status("directions", &body.status, body.error_message.as_deref())?;

        Ok(body.routes)
    }
}
