//! The radio's tuned frequency.

use tokio::sync::RwLock;

use aiatc_domain::AirportCode;

/// At most one tuned airport, changed only by an explicit tune.
#[derive(Default)]
pub struct TuningStore {
    tuned: RwLock<Option<AirportCode>>,
}

impl TuningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<AirportCode> {
        self.tuned.read().await.clone()
    }

    /// Tune to `airport`, returning the previous frequency.
    pub async fn set(&self, airport: AirportCode) -> Option<AirportCode> {
        self.tuned.write().await.replace(airport)
    }
}
