//! Server configuration.
//!
//! Tunables live in [`DashboardConfig`]; [`ServerSettings`] collects
//! everything `main` reads from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::nearest::DistanceMetric;
use crate::routes::RouteError;

/// Default number of candidate stations per trip endpoint.
pub const DEFAULT_NEAREST_K: usize = 5;

/// Default assumed cycling speed.
pub const DEFAULT_AVG_SPEED_KMH: f64 = 15.0;

/// Configuration for station search and route ranking.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Stations returned per endpoint when a request does not say.
    pub nearest_k: usize,

    /// Upper bound on a requested `k`.
    pub max_nearest_k: usize,

    /// Assumed cycling speed for ETAs (km/h).
    pub avg_speed_kmh: f64,

    /// Distance metric used when a request does not say.
    pub metric: DistanceMetric,
}

impl DashboardConfig {
    pub fn with_nearest_k(mut self, k: usize) -> Self {
        self.nearest_k = k;
        self
    }

    /// Set the cycling speed, rejecting non-positive or non-finite values.
    pub fn with_avg_speed_kmh(mut self, kmh: f64) -> Result<Self, RouteError> {
        if !kmh.is_finite() || kmh <= 0.0 {
            return Err(RouteError::InvalidSpeed(kmh));
        }
        self.avg_speed_kmh = kmh;
        Ok(self)
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Cycling speed in metres per second.
    pub fn avg_speed_mps(&self) -> f64 {
        self.avg_speed_kmh * 1000.0 / 3600.0
    }

    /// Resolve a requested `k`: missing means the default, negative means
    /// zero, and both the default and large values are capped.
    pub fn resolve_k(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.nearest_k.min(self.max_nearest_k),
            Some(k) if k <= 0 => 0,
            Some(k) => usize::try_from(k)
                .unwrap_or(usize::MAX)
                .min(self.max_nearest_k),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            nearest_k: DEFAULT_NEAREST_K,
            max_nearest_k: 50,
            avg_speed_kmh: DEFAULT_AVG_SPEED_KMH,
            metric: DistanceMetric::Planar,
        }
    }
}

/// Invalid environment setting.
#[derive(Debug, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    /// Mapbox token; empty when unset.
    pub mapbox_token: String,
    /// Fixture file for the mock backend, if requested.
    pub mock_fixture: Option<PathBuf>,
    pub dashboard: DashboardConfig,
    pub cache: CacheConfig,
}

/// Parse a trimmed variable value, reporting the variable on failure.
fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl ServerSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = match get("BIKESHARE_ADDR") {
            Some(v) => parse_var("BIKESHARE_ADDR", &v)?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let mut dashboard = DashboardConfig::default();

        if let Some(v) = get("BIKESHARE_NEAREST_K") {
            let k = parse_var("BIKESHARE_NEAREST_K", &v)?;
            dashboard = dashboard.with_nearest_k(k);
        }

        if let Some(v) = get("BIKESHARE_AVG_SPEED_KMH") {
            let kmh: f64 = parse_var("BIKESHARE_AVG_SPEED_KMH", &v)?;
            dashboard = dashboard.with_avg_speed_kmh(kmh).map_err(|e| ConfigError {
                var: "BIKESHARE_AVG_SPEED_KMH",
                value: v.clone(),
                reason: e.to_string(),
            })?;
        }

        let mut cache = CacheConfig::default();

        if let Some(v) = get("BIKESHARE_CACHE_TTL_SECS") {
            let secs = parse_var("BIKESHARE_CACHE_TTL_SECS", &v)?;
            cache = cache.with_ttl(Duration::from_secs(secs));
        }

        if let Some(v) = get("BIKESHARE_CACHE_CAPACITY") {
            let n = parse_var("BIKESHARE_CACHE_CAPACITY", &v)?;
            cache = cache.with_max_capacity(n);
        }

        Ok(Self {
            addr,
            data_dir: get("BIKESHARE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            mapbox_token: lookup("MAPBOX_ACCESS_TOKEN").unwrap_or_default(),
            mock_fixture: get("BIKESHARE_MOCK_MAPBOX").map(PathBuf::from),
            dashboard,
            cache,
        })
    }
}
