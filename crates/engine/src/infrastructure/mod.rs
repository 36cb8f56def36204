//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod airport_metadata;
pub mod clock;
pub mod config;
pub mod console;
pub mod local_persona;
pub mod ollama;
pub mod pilot;
pub mod ports;
pub mod randomuser;
pub mod telemetry_file;
