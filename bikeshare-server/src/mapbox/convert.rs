//! Conversion from Mapbox DTOs to domain types.

use crate::domain::{Coordinate, DomainError, RouteCandidate};

use super::types::{DirectionsResponse, DirectionsRoute, GeocodingResponse};

fn coordinate(pair: [f64; 2]) -> Result<Coordinate, DomainError> {
    Coordinate::new(pair[0], pair[1])
}

/// Take the best geocoding match, if any.
pub fn convert_geocoding(resp: &GeocodingResponse) -> Result<Option<Coordinate>, DomainError> {
    resp.features
        .first()
        .map(|feature| coordinate(feature.center))
        .transpose()
}

/// Convert one route; `index` is its position in the response.
pub fn convert_route(index: usize, route: &DirectionsRoute) -> Result<RouteCandidate, DomainError> {
    let coordinates = route
        .geometry
        .coordinates
        .iter()
        .copied()
        .map(coordinate)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteCandidate::new(format!("route-{index}"), route.distance, route.duration)
        .with_coordinates(coordinates))
}

/// Convert all routes, keeping the service's order.
pub fn convert_directions(resp: &DirectionsResponse) -> Result<Vec<RouteCandidate>, DomainError> {
    resp.routes
        .iter()
        .enumerate()
        .map(|(i, route)| convert_route(i, route))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapbox::types::{GeocodingFeature, LineString};

    fn route(distance: f64, duration: f64, coords: Vec<[f64; 2]>) -> DirectionsRoute {
        DirectionsRoute {
            distance,
            duration,
            geometry: LineString {
                coordinates: coords,
            },
        }
    }

    #[test]
    fn geocoding_takes_first_feature() {
        let resp = GeocodingResponse {
            features: vec![
                GeocodingFeature {
                    center: [-118.2365, 34.0561],
                    place_name: None,
                },
                GeocodingFeature {
                    center: [0.0, 0.0],
                    place_name: None,
                },
            ],
        };
        let c = convert_geocoding(&resp).unwrap().unwrap();
        assert_eq!(c.lon(), -118.2365);
        assert_eq!(c.lat(), 34.0561);
    }

    #[test]
    fn geocoding_without_features_is_none() {
        assert_eq!(convert_geocoding(&GeocodingResponse::default()).unwrap(), None);
    }

    #[test]
    fn geocoding_rejects_bad_center() {
        let resp = GeocodingResponse {
            features: vec![GeocodingFeature {
                center: [-118.0, 95.0],
                place_name: None,
            }],
        };
        assert!(convert_geocoding(&resp).is_err());
    }

    #[test]
    fn directions_assign_ids_in_order() {
        let resp = DirectionsResponse {
            code: Some("Ok".into()),
            routes: vec![
                route(3000.0, 700.0, vec![[-118.25, 34.05], [-118.24, 34.06]]),
                route(2500.0, 650.0, vec![]),
            ],
            message: None,
        };

        let routes = convert_directions(&resp).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, "route-0");
        assert_eq!(routes[1].id, "route-1");
        assert_eq!(routes[0].coordinates.len(), 2);
        assert_eq!(routes[0].distance_m, 3000.0);
        assert_eq!(routes[1].duration_s, 650.0);
    }

    #[test]
    fn directions_reject_bad_geometry() {
        let resp = DirectionsResponse {
            routes: vec![route(1.0, 1.0, vec![[f64::NAN, 34.0]])],
            ..Default::default()
        };
        assert!(convert_directions(&resp).is_err());
    }
}
