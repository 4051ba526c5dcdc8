//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::dataset::{Quarter, StationUsageSeries};
use crate::domain::{Coordinate, DomainError, StationId};
use crate::mapbox::MapboxError;
use crate::nearest::{nearest_with_metric, trip_candidates};
use crate::routes::{BoundingBox, MapView, RouteError, rank_routes};
use crate::selection::reduce;
use crate::usage::{DashboardStats, aggregate_with_names};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/quarters", get(list_quarters))
        .route("/api/quarter", post(select_quarter))
        .route("/api/usage", get(usage_table))
        .route("/api/stats", get(stats))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/nearest", get(nearest_stations))
        .route("/api/stations/:id/usage", get(station_usage))
        .route("/api/trip/search", post(trip_search))
        .route("/api/trip/select", post(trip_select))
        .route("/api/routes", post(plan_routes))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard page.
async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        quarters: QuarterOption::all(state.data.quarter().await),
        mock_mapping: state.mapbox.backend().is_mock(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest {
            message: e.body_text(),
        })
}

async fn list_quarters(State(state): State<AppState>) -> Json<QuartersResponse> {
    Json(QuartersResponse {
        quarters: Quarter::ALL.to_vec(),
        current: state.data.quarter().await,
    })
}

/// Switch the dashboard to another quarter.
///
/// A quarter whose files are missing still switches, to an empty dataset.
async fn select_quarter(
    State(state): State<AppState>,
    payload: Result<Json<SelectQuarterRequest>, JsonRejection>,
) -> Result<Json<QuarterSelectedResponse>, AppError> {
    let req = json_body(payload)?;
    let snapshot = state.data.select(req.quarter).await;

    Ok(Json(QuarterSelectedResponse {
        quarter: snapshot.quarter,
        total_rides: snapshot.total_rides(),
        rejected: snapshot.rejected,
    }))
}

/// Station usage table for the current quarter.
async fn usage_table(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let snapshot = state.data.snapshot().await;

    // Aggregation scans every ride; keep it off the async workers
    let task_snapshot = snapshot.clone();
    let usage = tokio::task::spawn_blocking(move || {
        aggregate_with_names(&task_snapshot.rides, &task_snapshot.names)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("aggregation task failed: {e}"),
    })?;

    if accepts_html(&headers) {
        render(&UsageTableTemplate {
            quarter: snapshot.quarter.to_string(),
            total_rides: snapshot.total_rides(),
            rows: UsageRowView::rows(&usage),
        })
    } else {
        Ok(Json(UsageResponse {
            quarter: snapshot.quarter,
            total_rides: snapshot.total_rides(),
            stations: usage,
        })
        .into_response())
    }
}

/// Chart series for the current quarter.
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let snapshot = state.data.snapshot().await;

    let quarter = snapshot.quarter;
    let stats = tokio::task::spawn_blocking(move || DashboardStats::compute(&snapshot.rides))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("stats task failed: {e}"),
        })?;

    Ok(Json(StatsResponse { quarter, stats }))
}

async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: state.stations.stations().to_vec(),
    })
}

/// Nearest stations to a point.
async fn nearest_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let point = Coordinate::new(req.lon, req.lat)?;
    let k = state.config.resolve_k(req.k);
    let metric = req.metric.unwrap_or(state.config.metric);

    let stations = nearest_with_metric(state.stations.stations(), point, k, metric);

    if accepts_html(&headers) {
        render(&NearestStationsTemplate {
            stations: stations.iter().map(NearestStationView::from_ranked).collect(),
        })
    } else {
        Ok(Json(NearestResponse {
            query: point,
            metric,
            stations,
        })
        .into_response())
    }
}

/// Hourly and daily usage for one station.
async fn station_usage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationUsageSeries>, AppError> {
    let id = StationId::parse(&id)?;

    if state.stations.get(&id).is_none() {
        return Err(AppError::NotFound {
            message: format!("Unknown station: {id}"),
        });
    }

    Ok(Json(state.stations.usage_series(&id)))
}

/// Geocode both ends of a trip and find candidate stations near each.
async fn trip_search(
    State(state): State<AppState>,
    payload: Result<Json<TripSearchRequest>, JsonRejection>,
) -> Result<Json<TripSearchResponse>, AppError> {
    let req = json_body(payload)?;

    for (label, text) in [("start", &req.start), ("end", &req.end)] {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest {
                message: format!("Missing {label} location"),
            });
        }
    }

    let (start, end) = futures::future::try_join(
        state.mapbox.geocode(&req.start),
        state.mapbox.geocode(&req.end),
    )
    .await?;

    let not_found = |text: &str| AppError::NotFound {
        message: format!("No location found for '{}'", text.trim()),
    };
    let start = start.ok_or_else(|| not_found(&req.start))?;
    let end = end.ok_or_else(|| not_found(&req.end))?;

    let k = state.config.resolve_k(req.k);
    let metric = req.metric.unwrap_or(state.config.metric);
    let candidates = trip_candidates(state.stations.stations(), start, end, k, metric);
    let combined = candidates.combined().into_iter().cloned().collect();

    Ok(Json(TripSearchResponse {
        start,
        end,
        view: MapView::for_trip(start, end),
        candidates,
        combined,
    }))
}

/// Apply one selection action and return the new selection.
async fn trip_select(
    headers: HeaderMap,
    payload: Result<Json<TripSelectRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = json_body(payload)?;
    let selection = reduce(&req.state, req.action);

    if accepts_html(&headers) {
        render(&SelectionCardTemplate::from_selection(&selection))
    } else {
        Ok(Json(TripSelectResponse::from(selection)).into_response())
    }
}

/// Fetch cycling routes and rank them by ETA.
async fn plan_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RoutesRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = json_body(payload)?;

    let avg_speed = match req.avg_speed_kmh {
        Some(kmh) => kmh * 1000.0 / 3600.0,
        None => state.config.avg_speed_mps(),
    };

    let candidates = state.mapbox.directions(req.start, req.end).await?;
    let routes = rank_routes(candidates.as_ref().clone(), avg_speed)?;

    if accepts_html(&headers) {
        return render(&RouteListTemplate {
            routes: routes.iter().map(RouteView::from_ranked).collect(),
        });
    }

    let all_points: Vec<Coordinate> = routes
        .iter()
        .flat_map(|r| r.route.coordinates.iter().copied())
        .collect();
    let view = routes
        .first()
        .and_then(|r| MapView::for_route(&r.route.coordinates));

    Ok(Json(RoutesResponse {
        bounds: BoundingBox::of(&all_points),
        view,
        routes,
    })
    .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<MapboxError> for AppError {
    fn from(e: MapboxError) -> Self {
        AppError::BadGateway {
            message: format!("Mapping service error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::cache::{CacheConfig, CachedMapbox};
    use crate::config::DashboardConfig;
    use crate::dataset::{DashboardData, DataPaths, DatasetSnapshot, StationCatalog, UsageCounter};
    use crate::domain::{RideRecord, Station, StationIdentity};
    use crate::mapbox::{MapBackend, MockMapbox};
    use crate::usage::StationNameLookup;

    const FIXTURE: &str = r#"{
        "places": {
            "union station": [-118.2365, 34.0561],
            "7th and flower": [-118.2588, 34.0485]
        },
        "directions": { "code": "Ok", "routes": [
            { "distance": 3000.0, "duration": 700.0,
              "geometry": { "coordinates": [[-118.2365, 34.0561], [-118.2588, 34.0485]] } },
            { "distance": 2500.0, "duration": 800.0,
              "geometry": { "coordinates": [[-118.2365, 34.0561], [-118.2500, 34.0600], [-118.2588, 34.0485]] } }
        ] }
    }"#;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn station(sid: &str, name: &str, lon: f64, lat: f64) -> Station {
        Station::new(id(sid), name, Coordinate::new(lon, lat).unwrap()).with_availability(3, 10)
    }

    fn test_state() -> AppState {
        let identities = vec![
            StationIdentity::new(id("3005"), "7th & Flower"),
            StationIdentity::new(id("3014"), "Union Station"),
        ];
        let rides = vec![
            RideRecord::new(Some(id("3005")), Some(id("3014"))),
            RideRecord::new(Some(id("3014")), Some(id("3005"))),
            RideRecord::new(Some(id("3005")), Some(id("4000"))),
        ];
        let snapshot = DatasetSnapshot {
            quarter: Quarter::Y2024Q3,
            names: StationNameLookup::from_identities(&identities),
            identities,
            rides,
            rejected: 0,
        };

        let stations = StationCatalog::new(
            vec![
                station("3005", "7th & Flower", -118.2588, 34.0485),
                station("3014", "Union Station", -118.2366, 34.0563),
                station("3030", "Grand Park", -118.2448, 34.0560),
            ],
            vec![UsageCounter {
                station_id: id("3005"),
                label: "8 AM".into(),
                usage: 12,
            }],
            vec![],
        );

        let mapbox = CachedMapbox::new(
            MapBackend::Mock(MockMapbox::from_json(FIXTURE).unwrap()),
            &CacheConfig::default(),
        );

        AppState::new(
            DashboardData::from_snapshot(DataPaths::new("/nonexistent"), snapshot),
            stations,
            mapbox,
            DashboardConfig::default().with_nearest_k(2),
        )
    }

    fn app() -> Router {
        create_router(test_state(), "static")
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(app(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn usage_table_json() {
        let (status, body) = get_json(app(), "/api/usage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quarter"], "2024-Q3");
        assert_eq!(body["total_rides"], 3);

        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0]["station_id"], "3005");
        assert_eq!(stations[0]["total_usage"], 3);
        assert_eq!(stations[2]["station_name"], "Unknown (4000)");
    }

    #[tokio::test]
    async fn usage_table_html() {
        let req = Request::get("/api/usage")
            .header(header::ACCEPT, "text/html")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<table"));
        assert!(body.contains("7th &amp; Flower"));
    }

    #[tokio::test]
    async fn stats_has_total() {
        let (status, body) = get_json(app(), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_rides"], 3);
        assert!(body["rides_per_day"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn select_missing_quarter_empties_dataset() {
        let (status, body) = post_json(app(), "/api/quarter", json!({"quarter": "2024-Q1"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quarter"], "2024-Q1");
        assert_eq!(body["total_rides"], 0);

        let (status, _) = post_json(app(), "/api/quarter", json!({"quarter": "2019-Q1"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn nearest_respects_k() {
        let (status, body) =
            get_json(app(), "/api/stations/nearest?lon=-118.2365&lat=34.0561&k=1").await;
        assert_eq!(status, StatusCode::OK);
        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0]["station"]["id"], "3014");

        let (_, body) = get_json(app(), "/api/stations/nearest?lon=-118.2365&lat=34.0561").await;
        assert_eq!(body["stations"].as_array().unwrap().len(), 2);

        let (_, body) =
            get_json(app(), "/api/stations/nearest?lon=-118.2365&lat=34.0561&k=-4").await;
        assert!(body["stations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn nearest_rejects_bad_coordinate() {
        let (status, body) = get_json(app(), "/api/stations/nearest?lon=-118&lat=120").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("coordinate"));

        let (status, _) = get_json(app(), "/api/stations/nearest?lon=abc&lat=34").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn station_usage_series() {
        let (status, body) = get_json(app(), "/api/stations/3005/usage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["daily"]["hours"][0], "8 AM");
        assert_eq!(body["daily"]["usage"][0], 12);

        let (status, _) = get_json(app(), "/api/stations/9999/usage").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn trip_search_finds_candidates() {
        let (status, body) = post_json(
            app(),
            "/api/trip/search",
            json!({"start": "Union Station", "end": "7th and Flower"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["near_start"][0]["station"]["id"], "3014");
        assert_eq!(body["near_end"][0]["station"]["id"], "3005");
        assert_eq!(body["combined"].as_array().unwrap().len(), 4);
        assert_eq!(body["view"]["zoom"], 13.0);
    }

    #[tokio::test]
    async fn trip_search_unknown_place_is_not_found() {
        let (status, body) = post_json(
            app(),
            "/api/trip/search",
            json!({"start": "Union Station", "end": "Atlantis"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No location found for 'Atlantis'");

        let (status, _) =
            post_json(app(), "/api/trip/search", json!({"start": " ", "end": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn trip_select_applies_action() {
        let pick = json!({
            "action": {"type": "pick", "value": {
                "id": "3005", "name": "7th & Flower", "coordinate": [-118.2588, 34.0485],
                "bikes_available": 3, "total_docks": 10
            }}
        });
        let (status, body) = post_json(app(), "/api/trip/select", pick).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selection"]["start"]["id"], "3005");
        assert!(body["selection"]["end"].is_null());
        assert_eq!(body["show_card"], true);
        assert_eq!(body["complete"], false);
    }

    #[tokio::test]
    async fn routes_are_ranked_by_eta() {
        let (status, body) = post_json(
            app(),
            "/api/routes",
            json!({"start": [-118.2365, 34.0561], "end": [-118.2588, 34.0485]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let routes = body["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 2);
        // Shorter route wins even though the service says it is slower
        assert_eq!(routes[0]["route"]["id"], "route-1");
        assert_eq!(routes[0]["tag"], "recommended");
        assert_eq!(routes[1]["highlighted"], true);
        assert_eq!(body["view"]["pitch"], 45.0);
        assert!(body["bounds"].is_object());
    }

    #[tokio::test]
    async fn routes_reject_bad_speed() {
        let (status, _) = post_json(
            app(),
            "/api/routes",
            json!({"start": [-118.2365, 34.0561], "end": [-118.2588, 34.0485], "avg_speed_kmh": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn app_error_statuses() {
        let cases = [
            (
                AppError::BadRequest {
                    message: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(MapboxError::RateLimited),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Internal {
                    message: "x".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
