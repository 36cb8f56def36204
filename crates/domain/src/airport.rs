//! Airport identifiers, the live airport directory, and static naming metadata.
//!
//! Two independent tables are keyed by [`AirportCode`]:
//! - [`AirportDirectory`] - the live set of known airports and their reference
//!   positions, supplied by the host simulator. It drives proximity and range.
//! - [`AirportMetadata`] - a preloaded, read-only table of display names. It is
//!   only used for human-readable naming and may be disjoint from the directory.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geodesy::{distance_nm, Position};

/// Maximum length accepted for an airport code.
const MAX_CODE_LENGTH: usize = 8;

// ============================================================================
// AirportCode
// ============================================================================

/// A validated airport code (non-empty, trimmed, upper-case, alphanumeric).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Create a new airport code, normalising to upper case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the code is empty after trimming,
    /// longer than 8 characters, or contains anything but ASCII letters,
    /// digits and dashes.
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Airport code cannot be empty"));
        }
        if trimmed.len() > MAX_CODE_LENGTH {
            return Err(DomainError::validation(format!(
                "Airport code cannot exceed {} characters",
                MAX_CODE_LENGTH
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DomainError::validation(format!(
                "Airport code '{}' contains invalid characters",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> String {
        code.0
    }
}

impl std::str::FromStr for AirportCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// AirportDirectory
// ============================================================================

/// The closest airport to a point, with its distance.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestAirport {
    pub code: AirportCode,
    pub distance_nm: f64,
}

/// Live directory of airport codes and reference positions.
///
/// Iteration order is insertion order. Nearest-airport ties resolve to the
/// airport inserted first.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    entries: Vec<(AirportCode, Position)>,
    index: HashMap<AirportCode, usize>,
}

impl AirportDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or move an airport. Re-inserting a code updates its position in place.
    pub fn insert(&mut self, code: AirportCode, position: Position) {
        match self.index.get(&code) {
            Some(&idx) => self.entries[idx].1 = position,
            None => {
                self.index.insert(code.clone(), self.entries.len());
                self.entries.push((code, position));
            }
        }
    }

    pub fn position(&self, code: &AirportCode) -> Option<Position> {
        self.index.get(code).map(|&idx| self.entries[idx].1)
    }

    pub fn contains(&self, code: &AirportCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AirportCode, Position)> {
        self.entries.iter().map(|(code, pos)| (code, *pos))
    }

    /// Scan every airport and return the closest one to `from`.
    ///
    /// Returns `None` for an empty directory.
    pub fn nearest(&self, from: Position) -> Option<NearestAirport> {
        let mut best: Option<(&AirportCode, f64)> = None;
        for (code, position) in self.iter() {
            let distance = distance_nm(from, position);
            if !distance.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, min)| distance < min) {
                best = Some((code, distance));
            }
        }
        best.map(|(code, distance_nm)| NearestAirport {
            code: code.clone(),
            distance_nm,
        })
    }
}

impl FromIterator<(AirportCode, Position)> for AirportDirectory {
    fn from_iter<T: IntoIterator<Item = (AirportCode, Position)>>(iter: T) -> Self {
        let mut directory = Self::new();
        for (code, position) in iter {
            directory.insert(code, position);
        }
        directory
    }
}

// ============================================================================
// AirportMetadata
// ============================================================================

/// Static descriptive data for one airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportInfo {
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Read-only table of airport display names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportMetadata {
    airports: HashMap<AirportCode, AirportInfo>,
}

impl AirportMetadata {
    pub fn new(airports: HashMap<AirportCode, AirportInfo>) -> Self {
        Self { airports }
    }

    pub fn get(&self, code: &AirportCode) -> Option<&AirportInfo> {
        self.airports.get(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// `"<name> (<CODE>)"` when the airport is known, otherwise the bare code.
    pub fn display_name(&self, code: &AirportCode) -> String {
        match self.get(code) {
            Some(info) => format!("{} ({})", info.name, code),
            None => code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AirportCode {
        AirportCode::new(s).expect("valid code")
    }

    #[test]
    fn code_is_trimmed_and_uppercased() {
        assert_eq!(code("  kjfk ").as_str(), "KJFK");
    }

    #[test]
    fn code_rejects_empty_and_garbage() {
        assert!(AirportCode::new("   ").is_err());
        assert!(AirportCode::new("KJ FK").is_err());
        assert!(AirportCode::new("WAYTOOLONGCODE").is_err());
    }

    #[test]
    fn nearest_picks_closest_airport() {
        let directory: AirportDirectory = [
            (code("A"), Position::new(0.0, 0.0)),
            (code("B"), Position::new(1.0, 1.0)),
            (code("C"), Position::new(10.0, 10.0)),
        ]
        .into_iter()
        .collect();

        let nearest = directory
            .nearest(Position::new(0.0, 0.0))
            .expect("non-empty directory");
        assert_eq!(nearest.code, code("A"));
        assert_eq!(nearest.distance_nm, 0.0);
    }

    #[test]
    fn nearest_ignores_an_airport_on_the_far_side_of_the_globe() {
        let here = Position::new(-42.5193, -80.0);
        let directory: AirportDirectory = [
            (code("FAR"), Position::new(42.5193, 100.0)),
            (code("HERE"), here),
        ]
        .into_iter()
        .collect();

        let nearest = directory.nearest(here).expect("non-empty directory");
        assert_eq!(nearest.code, code("HERE"));
        assert_eq!(nearest.distance_nm, 0.0);
    }

    #[test]
    fn nearest_skips_unusable_positions() {
        let directory: AirportDirectory = [
            (code("BAD"), Position::new(f64::NAN, 0.0)),
            (code("GOOD"), Position::new(1.0, 0.0)),
        ]
        .into_iter()
        .collect();

        let nearest = directory
            .nearest(Position::new(0.0, 0.0))
            .expect("one usable airport");
        assert_eq!(nearest.code, code("GOOD"));
    }

    #[test]
    fn nearest_on_empty_directory_is_none() {
        assert!(AirportDirectory::new()
            .nearest(Position::new(0.0, 0.0))
            .is_none());
    }

    #[test]
    fn nearest_tie_resolves_to_first_inserted() {
        let directory: AirportDirectory = [
            (code("EAST"), Position::new(0.0, 1.0)),
            (code("WEST"), Position::new(0.0, -1.0)),
        ]
        .into_iter()
        .collect();

        let nearest = directory
            .nearest(Position::new(0.0, 0.0))
            .expect("non-empty directory");
        assert_eq!(nearest.code, code("EAST"));
    }

    #[test]
    fn reinsert_updates_position_without_reordering() {
        let mut directory = AirportDirectory::new();
        directory.insert(code("A"), Position::new(0.0, 0.0));
        directory.insert(code("B"), Position::new(1.0, 1.0));
        directory.insert(code("A"), Position::new(5.0, 5.0));

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.position(&code("A")), Some(Position::new(5.0, 5.0)));
        let order: Vec<&str> = directory.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn metadata_display_name_falls_back_to_code() {
        let metadata: AirportMetadata = serde_json::from_str(
            r#"{"KJFK": {"name": "John F Kennedy International Airport", "lat": 40.64, "lon": -73.78}}"#,
        )
        .expect("valid metadata json");

        assert_eq!(
            metadata.display_name(&code("KJFK")),
            "John F Kennedy International Airport (KJFK)"
        );
        assert_eq!(metadata.display_name(&code("EGLL")), "EGLL");
    }
}
