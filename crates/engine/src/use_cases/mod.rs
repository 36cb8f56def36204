//! Use cases - User story orchestration.
//!
//! Each module covers one part of the radio: who is on duty, which airport is
//! near, and talking to it.

pub mod controller;
pub mod proximity;
pub mod radio;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::ControllerRegistry;
pub use proximity::ProximityTracker;
pub use radio::RadioUseCases;
