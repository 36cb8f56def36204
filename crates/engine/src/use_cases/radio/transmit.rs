//! Transmit a pilot message on the tuned frequency.
//!
//! Gating runs in a fixed order and the first failure wins: blank text, no
//! frequency, no controller on duty, airport gone from the directory, out of
//! radio range, reply still pending. Only then is the turn appended to the
//! airport's context and sent to the chat backend.

use std::sync::Arc;

use aiatc_domain::{
    distance_nm, in_range, AirportCode, AirportMetadata, PilotIdentity, RADIO_RANGE_NM,
};

use super::prompt::{intro_message, situational_update, IntroFacts};
use crate::infrastructure::ports::{
    ClockPort, FlightStateError, FlightStatePort, LlmError, LlmPort, LlmRequest,
    PilotIdentityPort, PresentationPort, Severity,
};
use crate::stores::{ConversationStore, TuningStore};
use crate::use_cases::controller::ControllerRegistry;

/// The controller answered.
#[derive(Debug, Clone)]
pub struct Transmitted {
    pub airport: AirportCode,
    pub reply: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransmitError {
    #[error("transmission cancelled")]
    Cancelled,
    #[error("no frequency set")]
    NotTuned,
    #[error("no controller on duty at {0}")]
    ControllerUnavailable(AirportCode),
    #[error("airport {0} is no longer known")]
    UnknownAirport(AirportCode),
    #[error("{airport} is {distance_nm:.1} NM away, out of radio range")]
    OutOfRange {
        airport: AirportCode,
        distance_nm: f64,
    },
    #[error("{0} has not answered the previous call yet")]
    Busy(AirportCode),
    #[error("flight state unavailable: {0}")]
    Telemetry(#[from] FlightStateError),
    #[error("no reply from {airport}: {source}")]
    Backend {
        airport: AirportCode,
        #[source]
        source: LlmError,
    },
}

/// Configuration for the chat request.
#[derive(Debug, Clone, Default)]
pub struct TransmitSettings {
    pub temperature: Option<f32>,
}

pub struct Transmit {
    tuning: Arc<TuningStore>,
    conversations: Arc<ConversationStore>,
    controllers: Arc<ControllerRegistry>,
    flight: Arc<dyn FlightStatePort>,
    pilot: Arc<dyn PilotIdentityPort>,
    presentation: Arc<dyn PresentationPort>,
    llm: Arc<dyn LlmPort>,
    clock: Arc<dyn ClockPort>,
    metadata: Arc<AirportMetadata>,
    settings: TransmitSettings,
}

impl Transmit {
    pub fn new(
        tuning: Arc<TuningStore>,
        conversations: Arc<ConversationStore>,
        controllers: Arc<ControllerRegistry>,
        flight: Arc<dyn FlightStatePort>,
        pilot: Arc<dyn PilotIdentityPort>,
        presentation: Arc<dyn PresentationPort>,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        metadata: Arc<AirportMetadata>,
        settings: TransmitSettings,
    ) -> Self {
        Self {
            tuning,
            conversations,
            controllers,
            flight,
            pilot,
            presentation,
            llm,
            clock,
            metadata,
            settings,
        }
    }

    /// Send `pilot_text` to the tuned controller and wait for the reply.
    ///
    /// Every failure is also shown to the pilot before it is returned.
    pub async fn execute(&self, pilot_text: &str) -> Result<Transmitted, TransmitError> {
        let result = self.transmit(pilot_text).await;
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    async fn transmit(&self, pilot_text: &str) -> Result<Transmitted, TransmitError> {
        let pilot_text = pilot_text.trim();
        if pilot_text.is_empty() {
            return Err(TransmitError::Cancelled);
        }

        let airport = self.tuning.get().await.ok_or(TransmitError::NotTuned)?;

        let Some(controller) = self.controllers.persona(&airport).await else {
            self.controllers.ensure_in_background(airport.clone());
            return Err(TransmitError::ControllerUnavailable(airport));
        };

        let snapshot = self.flight.snapshot()?;
        let airport_position = self
            .flight
            .airports()?
            .position(&airport)
            .ok_or_else(|| TransmitError::UnknownAirport(airport.clone()))?;

        let distance = distance_nm(snapshot.position, airport_position);
        if !in_range(distance) {
            return Err(TransmitError::OutOfRange {
                airport,
                distance_nm: distance,
            });
        }

        let _in_flight = self
            .conversations
            .try_reserve(&airport)
            .ok_or_else(|| TransmitError::Busy(airport.clone()))?;

        let date = self.clock.now().date_naive();
        let pilot = self
            .pilot
            .current_pilot()
            .unwrap_or_else(|| PilotIdentity::unknown(date));

        let update = situational_update(&airport, airport_position, &pilot.callsign, date, &snapshot);
        let turn = self
            .conversations
            .begin_turn(
                &airport,
                || {
                    intro_message(&IntroFacts {
                        controller: &controller,
                        airport_name: &self.metadata.display_name(&airport),
                        airport_position,
                        pilot: &pilot,
                        date,
                        snapshot: &snapshot,
                    })
                },
                update,
                pilot_text.to_string(),
            )
            .await;

        if turn.created {
            tracing::debug!(
                airport = %airport,
                controller = %controller.full_name(),
                "Opened conversation"
            );
        }
        tracing::debug!(
            airport = %airport,
            distance_nm = distance,
            messages = turn.messages.len(),
            "Transmitting"
        );

        self.presentation.pilot_says(
            &format!("{}: {}", snapshot.aircraft_name, pilot.callsign),
            pilot_text,
        );

        let request = LlmRequest::new(turn.messages).with_temperature(self.settings.temperature);
        let reply = match self.llm.generate(request).await {
            Ok(response) => response.into_message(),
            Err(source) => return Err(TransmitError::Backend { airport, source }),
        };

        self.conversations.record_reply(&airport, reply.clone()).await;
        self.presentation.controller_says(&airport, &reply.content);

        Ok(Transmitted {
            airport,
            reply: reply.content,
        })
    }

    fn report(&self, error: &TransmitError) {
        if matches!(error, TransmitError::Backend { .. }) {
            tracing::warn!(error = %error, "Chat backend failed");
        }
        if !matches!(
            error,
            TransmitError::Cancelled | TransmitError::Backend { .. }
        ) {
            self.presentation.play_static();
        }

        let (severity, message) = match error {
            TransmitError::Cancelled => (Severity::Info, "You cancelled the dialog.".to_string()),
            TransmitError::NotTuned => (
                Severity::Error,
                "No frequency set. Tune your radio to an airport frequency first.".to_string(),
            ),
            TransmitError::ControllerUnavailable(airport) => (
                Severity::Info,
                format!(
                    "Airport {} seems to be closed right now. Try again later...",
                    self.metadata.display_name(airport)
                ),
            ),
            TransmitError::UnknownAirport(airport) => (
                Severity::Error,
                format!("Airport with code {airport} can not be found!"),
            ),
            TransmitError::OutOfRange { airport, .. } => (
                Severity::Error,
                format!(
                    "Frequency {airport} is out of range. You need to be within {RADIO_RANGE_NM} nautical miles of the airport to contact it."
                ),
            ),
            TransmitError::Busy(airport) => (
                Severity::Info,
                format!("{airport} is still answering your last call. Stand by..."),
            ),
            TransmitError::Telemetry(e) => (Severity::Error, format!("Radio unavailable: {e}")),
            TransmitError::Backend { .. } => (Severity::Error, format!("{error}. Try again later...")),
        };
        self.presentation.notify(severity, &message);
    }
}
