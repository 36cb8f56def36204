//! Tune the radio to an airport frequency.

use std::sync::Arc;

use aiatc_domain::{AirportCode, NearestAirport};

use crate::infrastructure::ports::{FlightStateError, FlightStatePort, PresentationPort, Severity};
use crate::stores::TuningStore;
use crate::use_cases::controller::ControllerRegistry;

#[derive(Debug, thiserror::Error)]
pub enum TuneError {
    #[error("tuning cancelled")]
    Cancelled,
    #[error("invalid airport code '{0}'")]
    InvalidCode(String),
    #[error("airport {0} not found")]
    UnknownAirport(AirportCode),
    #[error("flight state unavailable: {0}")]
    Telemetry(#[from] FlightStateError),
}

pub struct TuneRadio {
    tuning: Arc<TuningStore>,
    flight: Arc<dyn FlightStatePort>,
    controllers: Arc<ControllerRegistry>,
    presentation: Arc<dyn PresentationPort>,
}

impl TuneRadio {
    pub fn new(
        tuning: Arc<TuningStore>,
        flight: Arc<dyn FlightStatePort>,
        controllers: Arc<ControllerRegistry>,
        presentation: Arc<dyn PresentationPort>,
    ) -> Self {
        Self {
            tuning,
            flight,
            controllers,
            presentation,
        }
    }

    /// Nearest airport right now, offered as the default frequency.
    pub fn suggested_frequency(&self) -> Option<NearestAirport> {
        let snapshot = self.flight.snapshot().ok()?;
        self.flight.airports().ok()?.nearest(snapshot.position)
    }

    /// Tune to `input`. Failures are also shown to the pilot.
    pub async fn execute(&self, input: &str) -> Result<AirportCode, TuneError> {
        let result = self.tune(input).await;
        match &result {
            Ok(code) => self.presentation.notify(
                Severity::Info,
                &format!("Your radio is now tuned to {code} frequency. You will now talk to them."),
            ),
            Err(TuneError::Cancelled) => self
                .presentation
                .notify(Severity::Info, "You cancelled the dialog."),
            Err(TuneError::InvalidCode(raw)) => self.not_found(raw),
            Err(TuneError::UnknownAirport(code)) => self.not_found(code.as_str()),
            Err(e @ TuneError::Telemetry(_)) => {
                self.presentation.notify(Severity::Error, &format!("Radio unavailable: {e}"))
            }
        }
        result
    }

    fn not_found(&self, code: &str) {
        self.presentation.notify(
            Severity::Error,
            &format!("Airport with code {code} can not be found!"),
        );
    }

    async fn tune(&self, input: &str) -> Result<AirportCode, TuneError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TuneError::Cancelled);
        }

        let code = AirportCode::new(input)
            .map_err(|_| TuneError::InvalidCode(input.to_ascii_uppercase()))?;

        if !self.flight.airports()?.contains(&code) {
            return Err(TuneError::UnknownAirport(code));
        }

        let previous = self.tuning.set(code.clone()).await;
        tracing::info!(
            airport = %code,
            previous = ?previous.as_ref().map(AirportCode::as_str),
            "Radio tuned"
        );
        self.controllers.ensure_in_background(code.clone());
        Ok(code)
    }
}
