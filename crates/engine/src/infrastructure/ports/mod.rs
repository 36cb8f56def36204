//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Chat completion (could swap Ollama -> any OpenAI-compatible backend)
//! - Persona generation (randomuser.me or the offline generator)
//! - Simulator state, pilot identity and presentation (host glue)
//! - Clock (for testing)

mod error;
mod external;
mod host;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{LlmPort, LlmRequest, LlmResponse, PersonaPort, TokenUsage};

// =============================================================================
// Host Ports
// =============================================================================
pub use host::{FlightStatePort, PilotIdentityPort, PresentationPort, Severity};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockLlmPort, MockPersonaPort};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{FlightStateError, LlmError, PersonaError};
