//! Controller Registry.
//!
//! Lazily materialises one controller persona per airport per day. At most one
//! persona request is in flight per airport and date; callers that arrive
//! while it is pending see `Pending`, never a second request. A failed request
//! is retried the next time `ensure` is called for that airport.

use std::sync::Arc;

use aiatc_domain::{AirportCode, ControllerPersona, ControllerSlot, PersonaSeed};

use crate::infrastructure::ports::{ClockPort, PersonaPort};
use crate::stores::ControllerStore;

pub struct ControllerRegistry {
    store: Arc<ControllerStore>,
    personas: Arc<dyn PersonaPort>,
    clock: Arc<dyn ClockPort>,
}

impl ControllerRegistry {
    pub fn new(
        store: Arc<ControllerStore>,
        personas: Arc<dyn PersonaPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            personas,
            clock,
        }
    }

    /// Make sure today's controller for `airport` exists or is being fetched.
    ///
    /// Returns the slot as this call left it.
    pub async fn ensure(&self, airport: &AirportCode) -> ControllerSlot {
        let seed = PersonaSeed::new(airport.clone(), self.clock.now().date_naive());

        if !self.store.claim(&seed).await {
            return self.store.slot(&seed.airport, seed.date).await;
        }

        tracing::debug!(seed = %seed, "Requesting controller persona");
        match self.personas.generate(&seed).await {
            Ok(persona) => {
                tracing::info!(
                    airport = %airport,
                    controller = %persona.full_name(),
                    "Controller on duty"
                );
                self.store.resolve(&seed, persona.clone()).await;
                ControllerSlot::Resolved(persona)
            }
            Err(e) => {
                tracing::warn!(airport = %airport, error = %e, "Controller persona request failed");
                self.store.fail(&seed).await;
                ControllerSlot::Failed
            }
        }
    }

    /// Fire-and-forget `ensure`. Must be called from within a Tokio runtime.
    pub fn ensure_in_background(self: &Arc<Self>, airport: AirportCode) {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            registry.ensure(&airport).await;
        });
    }

    /// Today's controller, if resolved. `None` reads as "airport closed".
    pub async fn persona(&self, airport: &AirportCode) -> Option<ControllerPersona> {
        self.store
            .persona(airport, self.clock.now().date_naive())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use tokio::sync::Notify;

    use aiatc_domain::Gender;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockClockPort, MockPersonaPort, PersonaError};

    fn kjfk() -> AirportCode {
        AirportCode::new("KJFK").expect("valid code")
    }

    fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 7, 14, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        ))
    }

    fn persona() -> ControllerPersona {
        ControllerPersona {
            first_name: "Henrik".into(),
            last_name: "Nielsen".into(),
            age: 47,
            gender: Gender::Male,
        }
    }

    #[tokio::test]
    async fn ensure_twice_same_day_requests_once() {
        let mut personas = MockPersonaPort::new();
        personas
            .expect_generate()
            .withf(|seed| seed.to_string() == "KJFK-2024-07-14")
            .times(1)
            .returning(|_| Ok(persona()));

        let registry =
            ControllerRegistry::new(Arc::new(ControllerStore::new()), Arc::new(personas), clock());

        let first = registry.ensure(&kjfk()).await;
        let second = registry.ensure(&kjfk()).await;

        assert_eq!(first, ControllerSlot::Resolved(persona()));
        assert_eq!(second, first);
        assert_eq!(registry.persona(&kjfk()).await, Some(persona()));
    }

    #[tokio::test]
    async fn failure_leaves_airport_closed_and_retries_later() {
        let mut personas = MockPersonaPort::new();
        let mut seq = mockall::Sequence::new();
        personas
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(PersonaError::RequestFailed("503".into())));
        personas
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(persona()));

        let registry =
            ControllerRegistry::new(Arc::new(ControllerStore::new()), Arc::new(personas), clock());

        assert_eq!(registry.ensure(&kjfk()).await, ControllerSlot::Failed);
        assert_eq!(registry.persona(&kjfk()).await, None);

        assert_eq!(
            registry.ensure(&kjfk()).await,
            ControllerSlot::Resolved(persona())
        );
    }

    #[tokio::test]
    async fn new_day_brings_a_new_controller() {
        let mut clock = MockClockPort::new();
        let mut days = mockall::Sequence::new();
        clock
            .expect_now()
            .times(2)
            .in_sequence(&mut days)
            .return_const(
                Utc.with_ymd_and_hms(2024, 7, 14, 23, 59, 0)
                    .single()
                    .expect("valid timestamp"),
            );
        clock
            .expect_now()
            .times(2)
            .in_sequence(&mut days)
            .return_const(
                Utc.with_ymd_and_hms(2024, 7, 15, 0, 1, 0)
                    .single()
                    .expect("valid timestamp"),
            );

        let mut personas = MockPersonaPort::new();
        personas
            .expect_generate()
            .withf(|seed| seed.to_string() == "KJFK-2024-07-14")
            .times(1)
            .returning(|_| Ok(persona()));
        personas
            .expect_generate()
            .withf(|seed| seed.to_string() == "KJFK-2024-07-15")
            .times(1)
            .returning(|_| {
                Ok(ControllerPersona {
                    first_name: "Rafael".into(),
                    ..persona()
                })
            });

        let registry = ControllerRegistry::new(
            Arc::new(ControllerStore::new()),
            Arc::new(personas),
            Arc::new(clock),
        );

        registry.ensure(&kjfk()).await;
        assert_eq!(registry.persona(&kjfk()).await, Some(persona()));

        // Yesterday's controller has gone home.
        assert_eq!(registry.persona(&kjfk()).await, None);
        let slot = registry.ensure(&kjfk()).await;
        assert_eq!(
            slot.persona().map(|p| p.first_name.as_str()),
            Some("Rafael")
        );
    }

    /// Holds every request until released, counting how many arrive.
    struct GatedPersonas {
        gate: Notify,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl PersonaPort for GatedPersonas {
        async fn generate(&self, _seed: &PersonaSeed) -> Result<ControllerPersona, PersonaError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(persona())
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_request() {
        let personas = Arc::new(GatedPersonas {
            gate: Notify::new(),
            requests: AtomicUsize::new(0),
        });
        let registry = ControllerRegistry::new(
            Arc::new(ControllerStore::new()),
            personas.clone(),
            clock(),
        );

        let airport_a = kjfk();
        let airport_b = kjfk();
        let (first, second, _) = tokio::join!(
            registry.ensure(&airport_a),
            registry.ensure(&airport_b),
            async { personas.gate.notify_one() },
        );

        assert_eq!(personas.requests.load(Ordering::SeqCst), 1);
        assert_eq!(first, ControllerSlot::Resolved(persona()));
        assert!(matches!(
            second,
            ControllerSlot::Pending | ControllerSlot::Resolved(_)
        ));
        assert_eq!(registry.persona(&kjfk()).await, Some(persona()));
    }
}
