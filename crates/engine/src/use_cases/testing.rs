//! Hand-written fakes shared by the use case tests.

use std::sync::{Arc, Mutex};

use aiatc_domain::{
    AirportCode, AirportDirectory, FlightSnapshot, PilotIdentity, Position, Season, SimClock,
};

use crate::infrastructure::ports::{
    FlightStateError, FlightStatePort, PilotIdentityPort, PresentationPort, Severity,
};

pub fn code(s: &str) -> AirportCode {
    AirportCode::new(s).expect("valid code")
}

/// A Cessna parked at sea level on a summer afternoon.
pub fn parked_snapshot(position: Position) -> FlightSnapshot {
    FlightSnapshot {
        aircraft_name: "Cessna 172".to_string(),
        position,
        on_ground: true,
        altitude_ft: 13.0,
        ground_elevation_ft: 13.0,
        kias: 0.0,
        heading_deg: 40.0,
        relative_wind_deg: -30.0,
        wind_speed_label: "light breeze".to_string(),
        air_temp_c: 18.0,
        season: Season::Summer,
        night: false,
        snowing: false,
        time: SimClock {
            hours: 14,
            minutes: 5,
        },
    }
}

struct FlightState {
    snapshot: FlightSnapshot,
    airports: AirportDirectory,
    unavailable: bool,
}

/// Mutable in-memory simulator.
pub struct FakeFlightState {
    state: Mutex<FlightState>,
}

impl FakeFlightState {
    pub fn new(snapshot: FlightSnapshot) -> Self {
        Self {
            state: Mutex::new(FlightState {
                snapshot,
                airports: AirportDirectory::new(),
                unavailable: false,
            }),
        }
    }

    pub fn parked_at(position: Position) -> Self {
        Self::new(parked_snapshot(position))
    }

    pub fn add_airport(&self, airport: &str, position: Position) {
        self.state
            .lock()
            .expect("lock")
            .airports
            .insert(code(airport), position);
    }

    pub fn clear_airports(&self) {
        self.state.lock().expect("lock").airports = AirportDirectory::new();
    }

    pub fn move_to(&self, position: Position) {
        self.state.lock().expect("lock").snapshot.position = position;
    }

    pub fn update(&self, f: impl FnOnce(&mut FlightSnapshot)) {
        f(&mut self.state.lock().expect("lock").snapshot);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().expect("lock").unavailable = unavailable;
    }
}

impl FlightStatePort for FakeFlightState {
    fn snapshot(&self) -> Result<FlightSnapshot, FlightStateError> {
        let state = self.state.lock().expect("lock");
        if state.unavailable {
            return Err(FlightStateError::Unavailable("simulator paused".into()));
        }
        Ok(state.snapshot.clone())
    }

    fn airports(&self) -> Result<Arc<AirportDirectory>, FlightStateError> {
        let state = self.state.lock().expect("lock");
        if state.unavailable {
            return Err(FlightStateError::Unavailable("simulator paused".into()));
        }
        Ok(Arc::new(state.airports.clone()))
    }
}

pub struct FixedPilot(pub Option<PilotIdentity>);

impl PilotIdentityPort for FixedPilot {
    fn current_pilot(&self) -> Option<PilotIdentity> {
        self.0.clone()
    }
}

/// Everything the pilot would have seen or heard, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    Notice(Severity, String),
    Static,
    Controller(AirportCode, String),
    Pilot(String, String),
}

#[derive(Default)]
pub struct RecordingPresentation {
    events: Mutex<Vec<Presented>>,
}

impl RecordingPresentation {
    pub fn events(&self) -> Vec<Presented> {
        self.events.lock().expect("lock").clone()
    }

    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Presented::Notice(severity, text) => Some((severity, text)),
                _ => None,
            })
            .collect()
    }

    pub fn static_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Presented::Static))
            .count()
    }

    fn push(&self, event: Presented) {
        self.events.lock().expect("lock").push(event);
    }
}

impl PresentationPort for RecordingPresentation {
    fn notify(&self, severity: Severity, message: &str) {
        self.push(Presented::Notice(severity, message.to_string()));
    }

    fn play_static(&self) {
        self.push(Presented::Static);
    }

    fn controller_says(&self, airport: &AirportCode, text: &str) {
        self.push(Presented::Controller(airport.clone(), text.to_string()));
    }

    fn pilot_says(&self, speaker: &str, text: &str) {
        self.push(Presented::Pilot(speaker.to_string(), text.to_string()));
    }
}
