use bikeshare_server::cache::CachedMapbox;
use bikeshare_server::config::ServerSettings;
use bikeshare_server::dataset::{DashboardData, DataPaths, Quarter, StationCatalog};
use bikeshare_server::mapbox::{MapBackend, MapboxClient, MapboxConfig, MockMapbox};
use bikeshare_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bikeshare_server=info,tower_http=info")),
        )
        .init();

    let settings = ServerSettings::from_env().expect("Invalid configuration");

    // Pick the mapping backend
    let backend = match &settings.mock_fixture {
        Some(path) => {
            let mock = MockMapbox::from_file(path).expect("Failed to load mock Mapbox fixture");
            info!(fixture = %path.display(), places = mock.place_count(), "using mock Mapbox");
            MapBackend::Mock(mock)
        }
        None => {
            if settings.mapbox_token.is_empty() {
                warn!("MAPBOX_ACCESS_TOKEN not set. Geocoding and routing will fail.");
            }
            let client = MapboxClient::new(MapboxConfig::new(&settings.mapbox_token))
                .expect("Failed to create Mapbox client");
            MapBackend::Live(client)
        }
    };
    let mapbox = CachedMapbox::new(backend, &settings.cache);

    // Load datasets; missing files leave the dashboard empty rather than failing
    let paths = DataPaths::new(&settings.data_dir);
    info!(dir = %paths.dir().display(), "loading datasets");
    let (data, stations) = tokio::join!(
        DashboardData::load(paths.clone(), Quarter::default()),
        StationCatalog::load(paths),
    );

    let state = AppState::new(data, stations, mapbox, settings.dashboard);
    let app = create_router(state, "static");

    let addr = settings.addr;
    info!("Bike share dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
