//! Askama templates for the web frontend.

use askama::Template;

use crate::dataset::Quarter;
use crate::domain::Station;
use crate::nearest::DistanceRankedStation;
use crate::routes::RankedRoute;
use crate::selection::TripSelection;
use crate::usage::StationUsage;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard page with the quarter dropdown and trip search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub quarters: Vec<QuarterOption>,
    pub mock_mapping: bool,
}

/// One entry in the quarter dropdown.
#[derive(Debug, Clone)]
pub struct QuarterOption {
    pub label: &'static str,
    pub selected: bool,
}

impl QuarterOption {
    pub fn all(current: Quarter) -> Vec<Self> {
        Quarter::ALL
            .into_iter()
            .map(|q| Self {
                label: q.label(),
                selected: q == current,
            })
            .collect()
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station usage table fragment.
#[derive(Template)]
#[template(path = "usage_table.html")]
pub struct UsageTableTemplate {
    pub quarter: String,
    pub total_rides: usize,
    pub rows: Vec<UsageRowView>,
}

/// Nearest stations list fragment.
#[derive(Template)]
#[template(path = "nearest_stations.html")]
pub struct NearestStationsTemplate {
    pub stations: Vec<NearestStationView>,
}

/// Ranked route list fragment.
#[derive(Template)]
#[template(path = "route_list.html")]
pub struct RouteListTemplate {
    pub routes: Vec<RouteView>,
}

/// Selected start/end card fragment.
#[derive(Template)]
#[template(path = "selection_card.html")]
pub struct SelectionCardTemplate {
    pub show: bool,
    pub start: Option<String>,
    pub end: Option<String>,
    pub complete: bool,
}

impl SelectionCardTemplate {
    pub fn from_selection(selection: &TripSelection) -> Self {
        let label = |s: &Option<Station>| s.as_ref().map(|s| s.name.clone());
        Self {
            show: selection.show_card(),
            start: label(&selection.start),
            end: label(&selection.end),
            complete: selection.is_complete(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Usage table row view model.
#[derive(Debug, Clone)]
pub struct UsageRowView {
    pub rank: usize,
    pub station_id: String,
    pub station_name: String,
    pub start_count: u32,
    pub end_count: u32,
    pub total_usage: u32,
}

impl UsageRowView {
    /// Rows are ranked from 1 in table order.
    pub fn rows(usage: &[StationUsage]) -> Vec<Self> {
        usage
            .iter()
            .enumerate()
            .map(|(i, u)| Self {
                rank: i + 1,
                station_id: u.station_id().to_string(),
                station_name: u.station_name().to_string(),
                start_count: u.start_count(),
                end_count: u.end_count(),
                total_usage: u.total_usage(),
            })
            .collect()
    }
}

/// Nearby station view model.
#[derive(Debug, Clone)]
pub struct NearestStationView {
    pub station_id: String,
    pub name: String,
    pub bikes_available: u32,
    pub total_docks: u32,
    pub distance: String,
}

impl NearestStationView {
    pub fn from_ranked(ranked: &DistanceRankedStation) -> Self {
        Self {
            station_id: ranked.station.id.to_string(),
            name: ranked.station.name.clone(),
            bikes_available: ranked.station.bikes_available,
            total_docks: ranked.station.total_docks,
            distance: format!("{:.4}", ranked.distance),
        }
    }
}

/// Route view model.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: String,
    pub eta_minutes: String,
    pub distance_km: String,
    pub recommended: bool,
    pub highlighted: bool,
}

impl RouteView {
    pub fn from_ranked(route: &RankedRoute) -> Self {
        Self {
            id: route.route.id.clone(),
            eta_minutes: format!("{:.0}", route.eta_minutes()),
            distance_km: format!("{:.2}", route.distance_km()),
            recommended: route.is_recommended(),
            highlighted: route.highlighted,
        }
    }

    /// CSS class for the route's line colour.
    pub fn colour_class(&self) -> &'static str {
        if self.recommended {
            "route-primary"
        } else if self.highlighted {
            "route-secondary"
        } else {
            "route-other"
        }
    }
}
