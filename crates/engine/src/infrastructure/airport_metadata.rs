//! Loads the static airport metadata table from JSON.
//!
//! Expected shape: `{ "KJFK": { "name": "...", "lat": 40.6, "lon": -73.7 }, ... }`.
//! Entries with an unusable code are skipped with a warning rather than
//! failing the whole table.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use aiatc_domain::{AirportCode, AirportInfo, AirportMetadata};

pub fn load_airport_metadata(path: &Path) -> Result<AirportMetadata> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read airport metadata from {}", path.display()))?;
    parse_airport_metadata(&raw)
        .with_context(|| format!("failed to parse airport metadata in {}", path.display()))
}

pub fn parse_airport_metadata(raw: &str) -> Result<AirportMetadata> {
    let entries: HashMap<String, AirportInfo> = serde_json::from_str(raw)?;

    let mut airports = HashMap::with_capacity(entries.len());
    for (code, info) in entries {
        match AirportCode::new(&code) {
            Ok(code) => {
                airports.insert(code, info);
            }
            Err(e) => tracing::warn!(code = %code, error = %e, "Skipping airport metadata entry"),
        }
    }

    Ok(AirportMetadata::new(airports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_names_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"LYBE": {{"name": "Belgrade Nikola Tesla Airport", "lat": 44.8184, "lon": 20.3091}},
                "bad code": {{"name": "Nowhere"}}}}"#
        )
        .expect("write metadata");

        let metadata = load_airport_metadata(file.path()).expect("loads");
        assert_eq!(metadata.len(), 1);
        let lybe = AirportCode::new("LYBE").expect("valid code");
        assert_eq!(
            metadata.display_name(&lybe),
            "Belgrade Nikola Tesla Airport (LYBE)"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(load_airport_metadata(&dir.path().join("airports.json")).is_err());
    }
}
