//! Offline persona generator.
//!
//! Draws a controller from built-in name lists with an RNG seeded from the
//! persona seed, so results are stable per airport and date without network
//! access.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use aiatc_domain::{ControllerPersona, Gender, PersonaSeed};

use crate::infrastructure::ports::{PersonaError, PersonaPort};

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Bruno", "Carlos", "Daniel", "Emil", "Felix", "Gustav", "Henrik", "Ivan", "Jonas",
    "Karan", "Liam", "Mateo", "Nikola", "Oscar", "Pierre", "Rafael", "Stefan", "Tomas", "Viktor",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bakker", "Costa", "Dubois", "Evans", "Fischer", "Garcia", "Hansen", "Iyer",
    "Jovanovic", "Kaya", "Lambert", "Moreau", "Nielsen", "Olsen", "Petrenko", "Rossi", "Schmidt",
    "Tremblay", "Walker",
];

const MIN_AGE: u32 = 24;
const MAX_AGE: u32 = 62;

/// Deterministic, network-free persona source.
#[derive(Debug, Clone, Default)]
pub struct LocalPersonaGenerator;

impl LocalPersonaGenerator {
    pub fn new() -> Self {
        Self
    }

    fn persona_for(seed: &PersonaSeed) -> ControllerPersona {
        let mut rng = StdRng::seed_from_u64(fnv1a(seed.to_string().as_bytes()));
        ControllerPersona {
            first_name: FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())].to_string(),
            last_name: LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())].to_string(),
            age: rng.gen_range(MIN_AGE..=MAX_AGE),
            gender: Gender::Male,
        }
    }
}

#[async_trait]
impl PersonaPort for LocalPersonaGenerator {
    async fn generate(&self, seed: &PersonaSeed) -> Result<ControllerPersona, PersonaError> {
        Ok(Self::persona_for(seed))
    }
}

/// FNV-1a, used instead of `DefaultHasher` whose output may change between
/// Rust releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}
