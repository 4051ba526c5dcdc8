//! Route ranking by estimated cycling time.
//!
//! The directions service's own duration assumes its own speed profile;
//! the dashboard instead estimates arrival from path length and a fixed
//! average cycling speed so that every candidate is judged the same way.

use serde::Serialize;

use crate::domain::RouteCandidate;

/// Average cycling speed of 15 km/h, in metres per second.
pub const DEFAULT_AVG_SPEED_MPS: f64 = 15.0 * 1000.0 / 3600.0;

/// Error from route ranking.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Speed was zero, negative or not finite
    #[error("average speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
}

/// How a ranked route is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTag {
    Recommended,
    Alternative,
}

/// A route candidate with its estimated time of arrival.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRoute {
    pub route: RouteCandidate,
    /// Estimated travel time in seconds.
    pub eta_s: f64,
    pub tag: RouteTag,
    /// Drawn in the alternative colour on the map (second-fastest only).
    pub highlighted: bool,
}

impl RankedRoute {
    /// ETA in minutes, for display.
    pub fn eta_minutes(&self) -> f64 {
        self.eta_s / 60.0
    }

    /// Path length in kilometres, for display.
    pub fn distance_km(&self) -> f64 {
        self.route.distance_m / 1000.0
    }

    pub fn is_recommended(&self) -> bool {
        self.tag == RouteTag::Recommended
    }
}

/// Rank routes fastest first.
///
/// ETA is `distance / avg_speed`; routes with equal ETA keep their input
/// order. The fastest route is tagged [`RouteTag::Recommended`] and the
/// second-fastest is highlighted as the alternative to show.
pub fn rank_routes(
    routes: Vec<RouteCandidate>,
    avg_speed: f64,
) -> Result<Vec<RankedRoute>, RouteError> {
    if !avg_speed.is_finite() || avg_speed <= 0.0 {
        return Err(RouteError::InvalidSpeed(avg_speed));
    }

    let mut ranked: Vec<RankedRoute> = routes
        .into_iter()
        .map(|route| RankedRoute {
            eta_s: route.distance_m / avg_speed,
            route,
            tag: RouteTag::Alternative,
            highlighted: false,
        })
        .collect();

    ranked.sort_by(|a, b| a.eta_s.total_cmp(&b.eta_s));

    if let Some(first) = ranked.first_mut() {
        first.tag = RouteTag::Recommended;
    }
    if let Some(second) = ranked.get_mut(1) {
        second.highlighted = true;
    }

    Ok(ranked)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn routes_strategy() -> impl Strategy<Value = Vec<RouteCandidate>> {
        prop::collection::vec(0.0f64..50_000.0, 0..8).prop_map(|lengths| {
            lengths
                .into_iter()
                .enumerate()
                .map(|(i, len)| RouteCandidate::new(format!("route-{i}"), len, 0.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sorted_by_eta(routes in routes_strategy(), speed in 0.5f64..15.0) {
            let ranked = rank_routes(routes, speed).unwrap();
            for window in ranked.windows(2) {
                prop_assert!(window[0].eta_s <= window[1].eta_s);
            }
        }

        #[test]
        fn preserves_elements(routes in routes_strategy(), speed in 0.5f64..15.0) {
            let len = routes.len();
            let ranked = rank_routes(routes, speed).unwrap();
            prop_assert_eq!(ranked.len(), len);
            prop_assert_eq!(ranked.iter().filter(|r| r.is_recommended()).count(), len.min(1));
            prop_assert_eq!(ranked.iter().filter(|r| r.highlighted).count(), len.saturating_sub(1).min(1));
        }
    }
}
