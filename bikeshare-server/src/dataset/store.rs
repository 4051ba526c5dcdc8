//! Shared, swappable ride dataset.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::{RideRecord, StationIdentity};
use crate::usage::StationNameLookup;

use super::catalog::{DataPaths, Quarter};
use super::error::DatasetError;
use super::loader::{load_rides_file, load_station_identities_file};

/// Rides and station names for one quarter.
#[derive(Debug, Clone, Default)]
pub struct DatasetSnapshot {
    pub quarter: Quarter,
    pub rides: Vec<RideRecord>,
    pub identities: Vec<StationIdentity>,
    pub names: StationNameLookup,
    /// Rows dropped while loading either file.
    pub rejected: usize,
}

impl DatasetSnapshot {
    /// An empty dataset for a quarter whose files could not be read.
    pub fn empty(quarter: Quarter) -> Self {
        Self {
            quarter,
            ..Self::default()
        }
    }

    pub fn total_rides(&self) -> usize {
        self.rides.len()
    }
}

/// Read both files for a quarter.
///
/// Blocking; run it on the blocking pool from async code.
pub fn read_snapshot(paths: &DataPaths, quarter: Quarter) -> Result<DatasetSnapshot, DatasetError> {
    let rides = load_rides_file(&paths.rides(quarter))?;
    let identities = load_station_identities_file(&paths.station_identities())?;
    let names = StationNameLookup::from_identities(&identities.records);

    Ok(DatasetSnapshot {
        quarter,
        rejected: rides.rejected + identities.rejected,
        rides: rides.records,
        identities: identities.records,
        names,
    })
}

/// The currently selected quarter's data.
///
/// Readers take a cheap `Arc` of the current snapshot; selecting another
/// quarter loads it off the async runtime and swaps it in. Switches run
/// one at a time, in the order they were requested.
#[derive(Clone)]
pub struct DashboardData {
    inner: Arc<RwLock<Arc<DatasetSnapshot>>>,
    switching: Arc<Mutex<()>>,
    paths: DataPaths,
}

impl DashboardData {
    /// Load the given quarter, falling back to an empty dataset if its
    /// files cannot be read.
    pub async fn load(paths: DataPaths, quarter: Quarter) -> Self {
        let snapshot = load_or_empty(&paths, quarter).await;
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
            switching: Arc::new(Mutex::new(())),
            paths,
        }
    }

    /// Wrap an already-built snapshot (for tests).
    pub fn from_snapshot(paths: DataPaths, snapshot: DatasetSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
            switching: Arc::new(Mutex::new(())),
            paths,
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<DatasetSnapshot> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    pub async fn quarter(&self) -> Quarter {
        self.inner.read().await.quarter
    }

    /// Switch to another quarter and return the new snapshot.
    ///
    /// A failed load still replaces the data, with an empty dataset.
    pub async fn select(&self, quarter: Quarter) -> Arc<DatasetSnapshot> {
        // Held across load and swap so a slow earlier load can't land last
        let _switching = self.switching.lock().await;
        let snapshot = Arc::new(load_or_empty(&self.paths, quarter).await);

        let mut guard = self.inner.write().await;
        *guard = Arc::clone(&snapshot);
        snapshot
    }
}

async fn load_or_empty(paths: &DataPaths, quarter: Quarter) -> DatasetSnapshot {
    let task_paths = paths.clone();
    let result = tokio::task::spawn_blocking(move || read_snapshot(&task_paths, quarter))
        .await
        .map_err(|e| DatasetError::Task(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(snapshot) => {
            info!(
                quarter = %quarter,
                rides = snapshot.total_rides(),
                stations = snapshot.names.len(),
                rejected = snapshot.rejected,
                "loaded ride data"
            );
            snapshot
        }
        Err(e) => {
            warn!(quarter = %quarter, error = %e, "failed to load ride data, using empty dataset");
            DatasetSnapshot::empty(quarter)
        }
    }
}
