//! Mapbox HTTP client.
//!
//! Wraps the forward geocoding and cycling directions endpoints and
//! converts their responses into domain types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, RouteCandidate};

use super::convert::{convert_directions, convert_geocoding};
use super::error::MapboxError;
use super::types::{DirectionsResponse, GeocodingResponse};

/// Default base URL for the Mapbox APIs.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// How much of an unparseable body to keep in the error.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the Mapbox client.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Public access token, sent as the `access_token` query parameter
    pub access_token: String,
    /// Base URL for the API (defaults to production Mapbox)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapboxConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Mapbox geocoding and directions client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
    semaphore: Arc<Semaphore>,
}

impl MapboxClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MapboxConfig) -> Result<Self, MapboxError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MapboxError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(MapboxError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, MapboxError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MapboxError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve free text to a coordinate.
    ///
    /// Returns `None` when the service finds no match.
    pub async fn geocode(&self, text: &str) -> Result<Option<Coordinate>, MapboxError> {
        let place = format!("{}.json", text.trim());
        let url = self.endpoint(&["geocoding", "v5", "mapbox.places", &place])?;

        let resp: GeocodingResponse = self.get_json(url, &[]).await?;
        let found = convert_geocoding(&resp)?;

        debug!(query = text, found = found.is_some(), "geocoded");
        Ok(found)
    }

    /// Cycling routes between two points, alternatives included.
    ///
    /// An empty vec means the service found no route.
    pub async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<RouteCandidate>, MapboxError> {
        let waypoints = format!("{start};{end}");
        let url = self.endpoint(&["directions", "v5", "mapbox", "cycling", &waypoints])?;

        let resp: DirectionsResponse = self
            .get_json(
                url,
                &[
                    ("alternatives", "true"),
                    ("geometries", "geojson"),
                    ("overview", "full"),
                ],
            )
            .await?;

        if resp.routes.is_empty() {
            debug!(
                code = resp.code.as_deref().unwrap_or(""),
                message = resp.message.as_deref().unwrap_or(""),
                "no cycling route"
            );
        }

        Ok(convert_directions(&resp)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, MapboxError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapboxError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(path = url.path(), "mapbox request");

        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MapboxError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapboxError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapboxError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapboxError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        })
    }
}
