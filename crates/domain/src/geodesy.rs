//! Great-circle geometry on a spherical Earth.
//!
//! Distances use the haversine formula with a 6371 km mean radius and are
//! reported in nautical miles. Bearings are initial (forward azimuth) bearings
//! in degrees, clockwise from true north.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per nautical mile.
const KM_PER_NM: f64 = 1.852;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat: {}, lon: {}", self.lat, self.lon)
    }
}

/// Haversine distance between two points, in nautical miles.
pub fn distance_nm(a: Position, b: Position) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c / KM_PER_NM
}

/// Initial bearing from `from` toward `to`, normalised to `[0, 360)`.
pub fn bearing_degrees(from: Position, to: Position) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// One of the eight 45° compass sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Octant {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Octant {
    /// Sectors in clockwise order starting at north.
    pub const ALL: [Octant; 8] = [
        Octant::North,
        Octant::Northeast,
        Octant::East,
        Octant::Southeast,
        Octant::South,
        Octant::Southwest,
        Octant::West,
        Octant::Northwest,
    ];

    /// Buckets a bearing into the sector centred on the nearest multiple of 45°.
    ///
    /// Total over all inputs: out-of-range bearings are wrapped first and a
    /// NaN lands in `North`.
    pub fn from_bearing(bearing: f64) -> Self {
        let shifted = normalize_degrees(bearing) + 22.5;
        let index = (shifted / 45.0).floor() as usize % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Octant::North => "north",
            Octant::Northeast => "northeast",
            Octant::East => "east",
            Octant::Southeast => "southeast",
            Octant::South => "south",
            Octant::Southwest => "southwest",
            Octant::West => "west",
            Octant::Northwest => "northwest",
        }
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
