//! Conversation context storage, one history per airport.
//!
//! Contexts live for the whole process; there is no eviction across airports.
//! The store also tracks which airports have a reply outstanding, so a second
//! transmission cannot interleave with the first.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use aiatc_domain::{AirportCode, ChatMessage, ConversationContext};

/// Messages to submit after a turn was appended.
#[derive(Debug, Clone)]
pub struct TurnStarted {
    pub messages: Vec<ChatMessage>,
    /// The context was created (and the intro written) by this turn.
    pub created: bool,
}

/// Per-airport conversation histories.
#[derive(Default)]
pub struct ConversationStore {
    contexts: Mutex<HashMap<AirportCode, ConversationContext>>,
    in_flight: Arc<StdMutex<HashSet<AirportCode>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the airport for one transmit. `None` while a reply is pending.
    ///
    /// The reservation is released when the guard drops, including when the
    /// transmit future is abandoned.
    pub fn try_reserve(&self, airport: &AirportCode) -> Option<InFlightGuard> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(airport.clone()) {
            return None;
        }
        Some(InFlightGuard {
            airport: airport.clone(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub async fn contains(&self, airport: &AirportCode) -> bool {
        self.contexts.lock().await.contains_key(airport)
    }

    /// Append a turn, creating the context with `intro()` on first use.
    pub async fn begin_turn(
        &self,
        airport: &AirportCode,
        intro: impl FnOnce() -> String,
        situational_update: String,
        pilot_message: String,
    ) -> TurnStarted {
        let mut contexts = self.contexts.lock().await;
        let created = !contexts.contains_key(airport);
        let context = contexts
            .entry(airport.clone())
            .or_insert_with(|| ConversationContext::new(intro()));
        context.begin_turn(situational_update, pilot_message);
        TurnStarted {
            messages: context.messages(),
            created,
        }
    }

    pub async fn record_reply(&self, airport: &AirportCode, reply: ChatMessage) {
        if let Some(context) = self.contexts.lock().await.get_mut(airport) {
            context.record_reply(reply.content);
        }
    }

    /// Snapshot of one airport's history.
    pub async fn get(&self, airport: &AirportCode) -> Option<ConversationContext> {
        self.contexts.lock().await.get(airport).cloned()
    }
}

/// Holds an airport's in-flight reservation.
pub struct InFlightGuard {
    airport: AirportCode,
    in_flight: Arc<StdMutex<HashSet<AirportCode>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.airport);
    }
}
