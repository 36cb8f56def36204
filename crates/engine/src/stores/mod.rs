//! In-memory state storage modules.
//!
//! Stores manage runtime state that lives only as long as the process:
//! - `ControllerStore` - Controller persona slots per airport and date
//! - `ConversationStore` - Conversation history per airport, plus in-flight guards
//! - `TuningStore` - The currently tuned airport

pub mod controller;
pub mod conversation;
pub mod tuning;

// Re-export store types
pub use controller::ControllerStore;
pub use conversation::{ConversationStore, InFlightGuard, TurnStarted};
pub use tuning::TuningStore;
