//! Bike-share dashboard server.
//!
//! Serves ride-usage statistics for a city bike-share system and helps a
//! rider plan a trip: find docks near two typed places, pick a start and
//! end station, and compare cycling routes between them by estimated
//! travel time.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod mapbox;
pub mod nearest;
pub mod routes;
pub mod selection;
pub mod usage;
pub mod web;
