//! Caching layer for Mapbox responses.
//!
//! Geocoding results are keyed by normalised query text. Directions are
//! keyed by both endpoints rounded to a fixed grid, so clicks on the
//! same station reuse the earlier routes.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, RouteCandidate};
use crate::mapbox::{MapBackend, MapboxError, normalize_query};

/// Endpoint pair in grid units: (start lon, start lat, end lon, end lat).
type RouteKey = (i64, i64, i64, i64);

/// Cached directions entry.
type RouteEntry = Arc<Vec<RouteCandidate>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per endpoint.
    pub max_capacity: u64,

    /// Decimal places kept when rounding route endpoints.
    pub coordinate_decimals: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
            coordinate_decimals: 5,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

/// Mapping backend with caching.
pub struct CachedMapbox {
    backend: MapBackend,
    places: MokaCache<String, Option<Coordinate>>,
    routes: MokaCache<RouteKey, RouteEntry>,
    scale: f64,
}

impl CachedMapbox {
    /// Create a new cached backend.
    pub fn new(backend: MapBackend, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            backend,
            places,
            routes,
            scale: 10f64.powi(config.coordinate_decimals as i32),
        }
    }

    fn route_key(&self, start: Coordinate, end: Coordinate) -> RouteKey {
        let grid = |v: f64| (v * self.scale).round() as i64;
        (
            grid(start.lon()),
            grid(start.lat()),
            grid(end.lon()),
            grid(end.lat()),
        )
    }

    /// Geocode free text, using the cache if available.
    ///
    /// "No match" is cached too; errors are not.
    pub async fn geocode(&self, text: &str) -> Result<Option<Coordinate>, MapboxError> {
        let key = normalize_query(text);

        if let Some(cached) = self.places.get(&key).await {
            return Ok(cached);
        }

        let found = self.backend.geocode(text).await?;
        self.places.insert(key, found).await;

        Ok(found)
    }

    /// Cycling routes between two points, using the cache if available.
    pub async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteEntry, MapboxError> {
        let key = self.route_key(start, end);

        if let Some(cached) = self.routes.get(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.backend.directions(start, end).await?);
        self.routes.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying backend for operations that bypass cache.
    pub fn backend(&self) -> &MapBackend {
        &self.backend
    }
}
