//! Proximity Tracker.
//!
//! Polls the aircraft position, keeps track of the nearest airport, and tells
//! the pilot once each time the nearest airport changes. Every change also
//! starts materialising that airport's controller in the background so it is
//! usually on duty by the time the pilot tunes in.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use aiatc_domain::{AirportCode, AirportMetadata, NearestAirport};

use crate::infrastructure::ports::{FlightStatePort, PresentationPort, Severity};
use crate::use_cases::controller::ControllerRegistry;

pub struct ProximityTracker {
    flight: Arc<dyn FlightStatePort>,
    controllers: Arc<ControllerRegistry>,
    presentation: Arc<dyn PresentationPort>,
    metadata: Arc<AirportMetadata>,
    nearest: Option<AirportCode>,
}

impl ProximityTracker {
    pub fn new(
        flight: Arc<dyn FlightStatePort>,
        controllers: Arc<ControllerRegistry>,
        presentation: Arc<dyn PresentationPort>,
        metadata: Arc<AirportMetadata>,
    ) -> Self {
        Self {
            flight,
            controllers,
            presentation,
            metadata,
            nearest: None,
        }
    }

    /// The airport the last tick found nearest.
    pub fn nearest(&self) -> Option<&AirportCode> {
        self.nearest.as_ref()
    }

    /// One scan. Returns the new nearest airport when it changed.
    ///
    /// Spawns the controller request, so it must run inside a Tokio runtime.
    pub fn tick(&mut self) -> Option<NearestAirport> {
        let (snapshot, airports) = match self
            .flight
            .snapshot()
            .and_then(|s| self.flight.airports().map(|a| (s, a)))
        {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping proximity scan");
                return None;
            }
        };

        let nearest = airports.nearest(snapshot.position)?;
        if self.nearest.as_ref() == Some(&nearest.code) {
            return None;
        }

        tracing::info!(
            airport = %nearest.code,
            distance_nm = nearest.distance_nm,
            "Nearest airport changed"
        );
        self.nearest = Some(nearest.code.clone());

        self.presentation.notify(
            Severity::Info,
            &format!(
                "You are now in range of {}. Set your radio frequency to {} to tune in with them",
                self.metadata.display_name(&nearest.code),
                nearest.code
            ),
        );
        self.controllers.ensure_in_background(nearest.code.clone());

        Some(nearest)
    }

    /// Tick forever at `period`. Late ticks are skipped rather than bunched.
    pub async fn run(mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};

    use aiatc_domain::{AirportInfo, ControllerSlot, Position};

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::local_persona::LocalPersonaGenerator;
    use crate::stores::ControllerStore;
    use crate::use_cases::testing::{code, FakeFlightState, RecordingPresentation};

    struct Harness {
        tracker: ProximityTracker,
        flight: Arc<FakeFlightState>,
        presentation: Arc<RecordingPresentation>,
        controllers: Arc<ControllerRegistry>,
    }

    fn harness(metadata: AirportMetadata) -> Harness {
        let flight = Arc::new(FakeFlightState::parked_at(Position::new(40.0, -73.0)));
        flight.add_airport("KAAA", Position::new(40.0, -73.0));
        flight.add_airport("KBBB", Position::new(40.5, -73.0));

        let presentation = Arc::new(RecordingPresentation::default());
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        ));
        let controllers = Arc::new(ControllerRegistry::new(
            Arc::new(ControllerStore::new()),
            Arc::new(LocalPersonaGenerator::new()),
            clock,
        ));

        let tracker = ProximityTracker::new(
            flight.clone(),
            controllers.clone(),
            presentation.clone(),
            Arc::new(metadata),
        );
        Harness {
            tracker,
            flight,
            presentation,
            controllers,
        }
    }

    #[tokio::test]
    async fn notifies_once_per_change() {
        let mut h = harness(AirportMetadata::default());

        let first = h.tracker.tick().expect("first scan finds an airport");
        assert_eq!(first.code, code("KAAA"));
        assert!(h.tracker.tick().is_none());
        assert_eq!(h.presentation.notices().len(), 1);

        h.flight.move_to(Position::new(40.45, -73.0));
        let second = h.tracker.tick().expect("nearest changed");
        assert_eq!(second.code, code("KBBB"));
        assert!(h.tracker.tick().is_none());

        let notices = h.presentation.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(
            notices[1],
            (
                Severity::Info,
                "You are now in range of KBBB. Set your radio frequency to KBBB to tune in with them"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn notice_uses_display_name_when_known() {
        let mut names = HashMap::new();
        names.insert(
            code("KAAA"),
            AirportInfo {
                name: "Alpha Field".to_string(),
                lat: None,
                lon: None,
            },
        );
        let mut h = harness(AirportMetadata::new(names));

        h.tracker.tick();

        assert_eq!(
            h.presentation.notices()[0].1,
            "You are now in range of Alpha Field (KAAA). Set your radio frequency to KAAA to tune in with them"
        );
    }

    #[tokio::test]
    async fn change_starts_controller_materialisation() {
        let mut h = harness(AirportMetadata::default());
        h.tracker.tick();

        for _ in 0..10 {
            if h.controllers.persona(&code("KAAA")).await.is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(h.controllers.persona(&code("KAAA")).await.is_some());
        assert!(matches!(
            h.controllers.ensure(&code("KAAA")).await,
            ControllerSlot::Resolved(_)
        ));
    }

    #[tokio::test]
    async fn empty_directory_is_silent() {
        let mut h = harness(AirportMetadata::default());
        h.flight.clear_airports();

        assert!(h.tracker.tick().is_none());
        assert!(h.tracker.nearest().is_none());
        assert!(h.presentation.notices().is_empty());
    }

    #[tokio::test]
    async fn telemetry_outage_keeps_last_airport() {
        let mut h = harness(AirportMetadata::default());
        h.tracker.tick();

        h.flight.set_unavailable(true);
        assert!(h.tracker.tick().is_none());
        assert_eq!(h.tracker.nearest(), Some(&code("KAAA")));
    }
}
