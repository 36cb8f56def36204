//! Controller persona storage.
//!
//! One slot per airport, stamped with the date it belongs to. A slot from an
//! earlier date reads as `NotRequested`, so personas roll over at midnight.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use aiatc_domain::{AirportCode, ControllerPersona, ControllerSlot, PersonaSeed};

#[derive(Debug, Clone)]
struct DatedSlot {
    date: NaiveDate,
    slot: ControllerSlot,
}

/// Per-airport controller slots.
#[derive(Default)]
pub struct ControllerStore {
    slots: RwLock<HashMap<AirportCode, DatedSlot>>,
}

impl ControllerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `airport` on `date`.
    pub async fn slot(&self, airport: &AirportCode, date: NaiveDate) -> ControllerSlot {
        self.slots
            .read()
            .await
            .get(airport)
            .filter(|s| s.date == date)
            .map(|s| s.slot.clone())
            .unwrap_or_default()
    }

    pub async fn persona(&self, airport: &AirportCode, date: NaiveDate) -> Option<ControllerPersona> {
        self.slot(airport, date).await.persona().cloned()
    }

    /// Mark the seed as pending if no request is resolved or in flight for it.
    ///
    /// Returns `true` when the caller won the claim and must issue the request.
    pub async fn claim(&self, seed: &PersonaSeed) -> bool {
        let mut slots = self.slots.write().await;
        let current = slots
            .get(&seed.airport)
            .filter(|s| s.date == seed.date)
            .map(|s| &s.slot);

        if current.is_some_and(|slot| !slot.needs_request()) {
            return false;
        }

        slots.insert(
            seed.airport.clone(),
            DatedSlot {
                date: seed.date,
                slot: ControllerSlot::Pending,
            },
        );
        true
    }

    pub async fn resolve(&self, seed: &PersonaSeed, persona: ControllerPersona) {
        self.settle(seed, ControllerSlot::Resolved(persona)).await;
    }

    pub async fn fail(&self, seed: &PersonaSeed) {
        self.settle(seed, ControllerSlot::Failed).await;
    }

    /// Settle a pending claim. A claim superseded by a newer date is left alone.
    async fn settle(&self, seed: &PersonaSeed, outcome: ControllerSlot) {
        let mut slots = self.slots.write().await;
        if let Some(entry) = slots
            .get_mut(&seed.airport)
            .filter(|s| s.date == seed.date)
        {
            entry.slot = outcome;
        }
    }
}
