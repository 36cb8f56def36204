//! Snapshot of the aircraft and its surroundings, as read from the simulator.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geodesy::{normalize_degrees, Position};

/// Subtracted from height above ground before flooring, so a parked or
/// touching-down aircraft reads 0 ft instead of a few spurious feet.
pub const GROUND_ALTITUDE_BIAS_FT: f64 = 50.0;

/// Below this indicated airspeed a grounded aircraft counts as stationary.
const STATIONARY_KIAS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        })
    }
}

/// Simulator local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    pub hours: u8,
    pub minutes: u8,
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Everything the radio needs to know about the aircraft right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    /// Display name of the aircraft type, e.g. "Cessna 172".
    pub aircraft_name: String,
    pub position: Position,
    pub on_ground: bool,
    /// Altitude above mean sea level.
    pub altitude_ft: f64,
    pub ground_elevation_ft: f64,
    /// Indicated airspeed.
    pub kias: f64,
    /// True heading, 0-360.
    pub heading_deg: f64,
    /// Wind angle relative to the aircraft heading.
    pub relative_wind_deg: f64,
    /// Free-form wind strength label, e.g. "light breeze".
    pub wind_speed_label: String,
    pub air_temp_c: f64,
    pub season: Season,
    pub night: bool,
    /// Precipitation (snow) flag.
    #[serde(default)]
    pub snowing: bool,
    pub time: SimClock,
}

impl FlightSnapshot {
    /// Height above ground, biased by [`GROUND_ALTITUDE_BIAS_FT`] and floored at zero.
    pub fn altitude_above_ground_ft(&self) -> f64 {
        (self.altitude_ft - self.ground_elevation_ft - GROUND_ALTITUDE_BIAS_FT).max(0.0)
    }

    /// Absolute wind direction: heading plus relative wind, in `[0, 360)`.
    pub fn wind_direction_deg(&self) -> f64 {
        normalize_degrees(self.heading_deg + self.relative_wind_deg)
    }

    pub fn ground_state(&self) -> &'static str {
        if self.on_ground {
            "on the ground"
        } else {
            "in the air"
        }
    }

    pub fn speed_description(&self) -> String {
        if self.on_ground {
            if self.kias > STATIONARY_KIAS {
                format!("moving at {:.0} kts", self.kias)
            } else {
                "stationary".to_string()
            }
        } else {
            format!(
                "flying at {:.0} kts, heading {:.0}",
                self.kias, self.heading_deg
            )
        }
    }

    pub fn wind_description(&self) -> String {
        format!(
            "{}, direction {:.0} degrees (or {:.0} degrees relative to the heading of the aircraft)",
            self.wind_speed_label,
            normalize_degrees(self.wind_direction_deg().round()),
            self.relative_wind_deg
        )
    }

    /// "day"/"night", prefixed with "snowy" when it is snowing.
    pub fn daylight_description(&self) -> String {
        let daylight = if self.night { "night" } else { "day" };
        if self.snowing {
            format!("snowy {daylight}")
        } else {
            daylight.to_string()
        }
    }
}

/// Who is flying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotIdentity {
    pub callsign: String,
    pub name: String,
    pub licensed_since: NaiveDate,
}

impl PilotIdentity {
    pub const UNKNOWN_CALLSIGN: &'static str = "Foo";
    pub const UNKNOWN_NAME: &'static str = "not known";

    /// Placeholder used when no pilot is signed in: licensed "today".
    pub fn unknown(today: NaiveDate) -> Self {
        Self {
            callsign: Self::UNKNOWN_CALLSIGN.to_string(),
            name: Self::UNKNOWN_NAME.to_string(),
            licensed_since: today,
        }
    }
}
