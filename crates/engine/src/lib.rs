//! AI ATC engine library.
//!
//! Proximity-gated radio conversations with AI air traffic controllers.
//!
//! ## Structure
//!
//! - `stores/` - In-memory runtime state (tuning, controllers, conversations)
//! - `use_cases/` - Controller registry, proximity tracking, tune and transmit
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::{Adapters, App};
