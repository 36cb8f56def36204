//! Host simulator ports: live flight state, pilot identity, and presentation.
//!
//! These are synchronous. Reading telemetry and rendering a notice never
//! suspend; only the network-backed ports in `external` do.

use std::sync::Arc;

use aiatc_domain::{AirportCode, AirportDirectory, FlightSnapshot, PilotIdentity};

use super::error::FlightStateError;

/// Live aircraft and world state.
pub trait FlightStatePort: Send + Sync {
    /// Current aircraft snapshot.
    fn snapshot(&self) -> Result<FlightSnapshot, FlightStateError>;

    /// Airports the simulator currently knows about.
    fn airports(&self) -> Result<Arc<AirportDirectory>, FlightStateError>;
}

/// Signed-in pilot, if any.
pub trait PilotIdentityPort: Send + Sync {
    fn current_pilot(&self) -> Option<PilotIdentity>;
}

/// Severity of a plain notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Renders notices and radio traffic to the pilot.
pub trait PresentationPort: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);

    /// Audible radio static, played on every failed transmission.
    fn play_static(&self);

    /// The controller at `airport` speaks (text + voice).
    fn controller_says(&self, airport: &AirportCode, text: &str);

    /// Echo of the pilot's own transmission; `speaker` is "<aircraft>: <callsign>".
    fn pilot_says(&self, speaker: &str, text: &str);
}
