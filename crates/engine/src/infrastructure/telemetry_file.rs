//! File-backed simulator state.
//!
//! A simulator bridge keeps a JSON file up to date:
//!
//! ```json
//! {
//!   "aircraft": { "aircraft_name": "Cessna 172", "position": {"lat": 40.64, "lon": -73.77}, ... },
//!   "airports": { "KJFK": [40.6413, -73.7781], "KLGA": [40.7769, -73.8740] }
//! }
//! ```
//!
//! The file is re-parsed only when its modification time changes. Airports
//! are ordered by code, which makes nearest-airport ties deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use serde::Deserialize;

use aiatc_domain::{AirportCode, AirportDirectory, FlightSnapshot, Position};

use crate::infrastructure::ports::{FlightStateError, FlightStatePort};

#[derive(Debug, Deserialize)]
struct TelemetryFile {
    aircraft: FlightSnapshot,
    #[serde(default)]
    airports: BTreeMap<String, [f64; 2]>,
}

#[derive(Debug, Clone)]
struct Telemetry {
    modified: SystemTime,
    aircraft: FlightSnapshot,
    airports: Arc<AirportDirectory>,
}

/// Reads aircraft state and the airport directory from a JSON file.
pub struct JsonFileFlightState {
    path: PathBuf,
    cached: Mutex<Option<Telemetry>>,
}

impl JsonFileFlightState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn current(&self) -> Result<Telemetry, FlightStateError> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| FlightStateError::Unavailable(format!("{}: {e}", self.path.display())))?;

        let mut cached = self
            .cached
            .lock()
            .map_err(|_| FlightStateError::Unavailable("telemetry cache poisoned".to_string()))?;

        if let Some(telemetry) = cached.as_ref().filter(|t| t.modified == modified) {
            return Ok(telemetry.clone());
        }

        let telemetry = self.load(modified)?;
        tracing::debug!(
            path = %self.path.display(),
            airports = telemetry.airports.len(),
            "Reloaded telemetry"
        );
        *cached = Some(telemetry.clone());
        Ok(telemetry)
    }

    fn load(&self, modified: SystemTime) -> Result<Telemetry, FlightStateError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| FlightStateError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let file: TelemetryFile =
            serde_json::from_str(&raw).map_err(|e| FlightStateError::Parse(e.to_string()))?;

        let mut airports = AirportDirectory::new();
        for (code, [lat, lon]) in file.airports {
            match AirportCode::new(&code) {
                Ok(code) => airports.insert(code, Position::new(lat, lon)),
                Err(e) => tracing::warn!(code = %code, error = %e, "Skipping telemetry airport"),
            }
        }

        Ok(Telemetry {
            modified,
            aircraft: file.aircraft,
            airports: Arc::new(airports),
        })
    }
}

impl FlightStatePort for JsonFileFlightState {
    fn snapshot(&self) -> Result<FlightSnapshot, FlightStateError> {
        self.current().map(|t| t.aircraft)
    }

    fn airports(&self) -> Result<Arc<AirportDirectory>, FlightStateError> {
        self.current().map(|t| t.airports)
    }
}
