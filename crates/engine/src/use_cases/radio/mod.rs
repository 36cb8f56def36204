//! Radio use cases.
//!
//! The pilot tunes to an airport frequency, then transmits. Each airport keeps
//! its own conversation; retuning to an airport resumes where it left off.

use std::sync::Arc;

mod prompt;
mod transmit;
mod tune;

pub use transmit::{Transmit, TransmitError, TransmitSettings, Transmitted};
pub use tune::{TuneError, TuneRadio};

/// Container for radio use cases.
pub struct RadioUseCases {
    pub tune: Arc<TuneRadio>,
    pub transmit: Arc<Transmit>,
}

impl RadioUseCases {
    pub fn new(tune: Arc<TuneRadio>, transmit: Arc<Transmit>) -> Self {
        Self { tune, transmit }
    }
}
