//! Radio rules: range, ATC facility selection, and how the controller
//! should address the pilot.

use std::fmt;

use crate::airport::AirportCode;
use crate::flight::FlightSnapshot;
use crate::geodesy::{bearing_degrees, distance_nm, Octant, Position};

/// Maximum distance at which a tuned airport can be contacted (inclusive).
pub const RADIO_RANGE_NM: f64 = 50.0;

/// Within this distance the aircraft is "at" or "above" the airport.
pub const AIRPORT_VICINITY_NM: f64 = 1.0;

/// Highest sea-level altitude still handled by the tower.
pub const TOWER_CEILING_FT: f64 = 5000.0;

/// Light aircraft whose type name is spoken as part of the callsign.
const SMALL_AIRCRAFT_KEYWORDS: [&str; 2] = ["cessna", "piper"];

pub fn in_range(distance_nm: f64) -> bool {
    distance_nm <= RADIO_RANGE_NM
}

/// Which ATC position is working the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facility {
    Ground,
    Tower,
    AreaControl,
}

impl Facility {
    pub fn for_flight(snapshot: &FlightSnapshot) -> Self {
        if snapshot.on_ground {
            Facility::Ground
        } else if snapshot.altitude_ft <= TOWER_CEILING_FT {
            Facility::Tower
        } else {
            Facility::AreaControl
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Ground => "Ground",
            Facility::Tower => "Tower",
            Facility::AreaControl => "Area Control",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_small_aircraft(aircraft_name: &str) -> bool {
    let lower = aircraft_name.to_lowercase();
    SMALL_AIRCRAFT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// `"<callsign>, <CODE> <Facility>"`, prefixed with the aircraft name for
/// light aircraft.
pub fn radio_address(callsign: &str, airport: &AirportCode, snapshot: &FlightSnapshot) -> String {
    let address = format!(
        "{}, {} {}",
        callsign,
        airport,
        Facility::for_flight(snapshot)
    );
    if is_small_aircraft(&snapshot.aircraft_name) {
        format!("{} {}", snapshot.aircraft_name, address)
    } else {
        address
    }
}

/// Where the aircraft is relative to the airport, in words.
pub fn relative_position(airport: Position, snapshot: &FlightSnapshot) -> String {
    let distance = distance_nm(snapshot.position, airport);
    if distance > AIRPORT_VICINITY_NM {
        let octant = Octant::from_bearing(bearing_degrees(airport, snapshot.position));
        format!("{:.1} nautical miles {} from the airport", distance, octant)
    } else if snapshot.on_ground {
        "at the airport".to_string()
    } else {
        "above the airport".to_string()
    }
}
