//! Live or mock mapping backend.

use crate::domain::{Coordinate, RouteCandidate};

use super::client::MapboxClient;
use super::error::MapboxError;
use super::mock::MockMapbox;

/// The mapping service the server talks to.
#[derive(Debug, Clone)]
pub enum MapBackend {
    Live(MapboxClient),
    Mock(MockMapbox),
}

impl MapBackend {
    pub async fn geocode(&self, text: &str) -> Result<Option<Coordinate>, MapboxError> {
        match self {
            MapBackend::Live(client) => client.geocode(text).await,
            MapBackend::Mock(mock) => mock.geocode(text).await,
        }
    }

    pub async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<RouteCandidate>, MapboxError> {
        match self {
            MapBackend::Live(client) => client.directions(start, end).await,
            MapBackend::Mock(mock) => mock.directions(start, end).await,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, MapBackend::Mock(_))
    }
}

impl From<MapboxClient> for MapBackend {
    fn from(client: MapboxClient) -> Self {
        MapBackend::Live(client)
    }
}

impl From<MockMapbox> for MapBackend {
    fn from(mock: MockMapbox) -> Self {
        MapBackend::Mock(mock)
    }
}
