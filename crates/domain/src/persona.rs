//! Controller personas and their per-airport lifecycle.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::airport::AirportCode;

/// Gender reported by the persona service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated air traffic controller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerPersona {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
}

impl ControllerPersona {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Seed identifying one persona: the same airport on the same date always
/// yields the same controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonaSeed {
    pub airport: AirportCode,
    pub date: NaiveDate,
}

impl PersonaSeed {
    pub fn new(airport: AirportCode, date: NaiveDate) -> Self {
        Self { airport, date }
    }
}

impl fmt::Display for PersonaSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.airport, self.date.format("%Y-%m-%d"))
    }
}

/// Lifecycle of one airport's controller for a given date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerSlot {
    #[default]
    NotRequested,
    Pending,
    Resolved(ControllerPersona),
    Failed,
}

impl ControllerSlot {
    /// A new request is warranted only when nothing is resolved or in flight.
    pub fn needs_request(&self) -> bool {
        matches!(self, ControllerSlot::NotRequested | ControllerSlot::Failed)
    }

    pub fn persona(&self) -> Option<&ControllerPersona> {
        match self {
            ControllerSlot::Resolved(persona) => Some(persona),
            _ => None,
        }
    }
}
