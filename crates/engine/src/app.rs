//! Application state and composition.

use std::sync::Arc;

use aiatc_domain::AirportMetadata;

use crate::infrastructure::ports::{
    ClockPort, FlightStatePort, LlmPort, PersonaPort, PilotIdentityPort, PresentationPort,
};
use crate::stores::{ControllerStore, ConversationStore, TuningStore};
use crate::use_cases;
use crate::use_cases::radio::TransmitSettings;

/// Main application state.
///
/// Holds the runtime stores and use cases. The console loop and the proximity
/// tracker both work off one shared `App`.
pub struct App {
    pub stores: Stores,
    pub use_cases: UseCases,
    pub controllers: Arc<use_cases::ControllerRegistry>,
    flight: Arc<dyn FlightStatePort>,
    presentation: Arc<dyn PresentationPort>,
    metadata: Arc<AirportMetadata>,
}

/// In-memory runtime state.
pub struct Stores {
    pub tuning: Arc<TuningStore>,
    pub conversations: Arc<ConversationStore>,
    pub controllers: Arc<ControllerStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub radio: use_cases::RadioUseCases,
}

/// Everything the engine talks to outside itself.
pub struct Adapters {
    pub flight: Arc<dyn FlightStatePort>,
    pub pilot: Arc<dyn PilotIdentityPort>,
    pub presentation: Arc<dyn PresentationPort>,
    pub llm: Arc<dyn LlmPort>,
    pub personas: Arc<dyn PersonaPort>,
    pub clock: Arc<dyn ClockPort>,
}

impl App {
    pub fn new(adapters: Adapters, metadata: AirportMetadata, settings: TransmitSettings) -> Self {
        let Adapters {
            flight,
            pilot,
            presentation,
            llm,
            personas,
            clock,
        } = adapters;
        let metadata = Arc::new(metadata);

        let stores = Stores {
            tuning: Arc::new(TuningStore::new()),
            conversations: Arc::new(ConversationStore::new()),
            controllers: Arc::new(ControllerStore::new()),
        };

        let controllers = Arc::new(use_cases::ControllerRegistry::new(
            stores.controllers.clone(),
            personas,
            clock.clone(),
        ));

        let tune = Arc::new(use_cases::radio::TuneRadio::new(
            stores.tuning.clone(),
            flight.clone(),
            controllers.clone(),
            presentation.clone(),
        ));
        let transmit = Arc::new(use_cases::radio::Transmit::new(
            stores.tuning.clone(),
            stores.conversations.clone(),
            controllers.clone(),
            flight.clone(),
            pilot,
            presentation.clone(),
            llm,
            clock,
            metadata.clone(),
            settings,
        ));

        Self {
            stores,
            use_cases: UseCases {
                radio: use_cases::RadioUseCases::new(tune, transmit),
            },
            controllers,
            flight,
            presentation,
            metadata,
        }
    }

    /// A fresh tracker over the app's flight state and controllers.
    pub fn proximity_tracker(&self) -> use_cases::ProximityTracker {
        use_cases::ProximityTracker::new(
            self.flight.clone(),
            self.controllers.clone(),
            self.presentation.clone(),
            self.metadata.clone(),
        )
    }

    pub fn metadata(&self) -> &AirportMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    use aiatc_domain::Position;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort, MockPersonaPort};
    use crate::use_cases::testing::{
        code, FakeFlightState, FixedPilot, Presented, RecordingPresentation,
    };

    #[tokio::test]
    async fn approach_tune_and_talk() {
        let flight = Arc::new(FakeFlightState::parked_at(Position::new(44.8184, 20.3091)));
        flight.add_airport("LYBE", Position::new(44.8184, 20.3091));
        flight.add_airport("LYNS", Position::new(45.2542, 19.8313));
        let presentation = Arc::new(RecordingPresentation::default());

        let mut personas = MockPersonaPort::new();
        personas
            .expect_generate()
            .withf(|seed| seed.to_string() == "LYBE-2024-05-20")
            .times(1)
            .returning(|_| {
                Ok(aiatc_domain::ControllerPersona {
                    first_name: "Milan".into(),
                    last_name: "Petrovic".into(),
                    age: 45,
                    gender: aiatc_domain::Gender::Male,
                })
            });
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(|_| {
            Ok(LlmResponse {
                content: "Cessna 172 YU-DLE, LYBE Ground, taxi to holding point runway 30".into(),
                usage: None,
            })
        });

        let app = App::new(
            Adapters {
                flight: flight.clone(),
                pilot: Arc::new(FixedPilot(None)),
                presentation: presentation.clone(),
                llm: Arc::new(llm),
                personas: Arc::new(personas),
                clock: Arc::new(FixedClock(
                    Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0)
                        .single()
                        .expect("valid timestamp"),
                )),
            },
            AirportMetadata::default(),
            TransmitSettings::default(),
        );

        let mut tracker = app.proximity_tracker();
        assert_eq!(tracker.tick().map(|n| n.code), Some(code("LYBE")));

        let suggested = app
            .use_cases
            .radio
            .tune
            .suggested_frequency()
            .expect("nearest known");
        app.use_cases
            .radio
            .tune
            .execute(suggested.code.as_str())
            .await
            .expect("tuned");

        // Wait out the background persona request started by the tracker.
        for _ in 0..10 {
            if app.controllers.persona(&code("LYBE")).await.is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }

        let transmitted = app
            .use_cases
            .radio
            .transmit
            .execute("request taxi")
            .await
            .expect("controller answers");
        assert!(transmitted.reply.starts_with("Cessna 172 YU-DLE"));
        assert!(app.stores.conversations.contains(&code("LYBE")).await);
        assert!(presentation
            .events()
            .contains(&Presented::Controller(code("LYBE"), transmitted.reply)));
    }
}
