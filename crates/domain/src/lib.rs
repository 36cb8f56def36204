//! AI ATC domain: pure types and rules, no I/O.

pub mod airport;
pub mod conversation;
pub mod error;
pub mod flight;
pub mod geodesy;
pub mod persona;
pub mod radio;

pub use airport::{AirportCode, AirportDirectory, AirportInfo, AirportMetadata, NearestAirport};
pub use conversation::{
    ChatMessage, ConversationContext, EntryKind, MessageRole, MAX_ENTRIES_BEFORE_TURN,
};
pub use error::DomainError;
pub use flight::{FlightSnapshot, PilotIdentity, Season, SimClock, GROUND_ALTITUDE_BIAS_FT};
pub use geodesy::{bearing_degrees, distance_nm, normalize_degrees, Octant, Position};
pub use persona::{ControllerPersona, ControllerSlot, Gender, PersonaSeed};
pub use radio::{
    in_range, is_small_aircraft, radio_address, relative_position, Facility, AIRPORT_VICINITY_NM,
    RADIO_RANGE_NM, TOWER_CEILING_FT,
};
