//! Error types for port operations.

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the controller persona service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PersonaError {
    #[error("Persona request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid persona response: {0}")]
    InvalidResponse(String),
    #[error("Persona service returned no results")]
    Empty,
}

/// Errors reading live aircraft/world state from the simulator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FlightStateError {
    /// No telemetry available yet (simulator not running, file missing).
    #[error("Flight state unavailable: {0}")]
    Unavailable(String),
    /// Telemetry present but malformed.
    #[error("Flight state could not be parsed: {0}")]
    Parse(String),
}
