//! Public tracking identifiers for anonymous status lookup.

use std::str::FromStr;

use redress_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Symbols used in tracking identifiers. Ambiguous glyphs (0/O, 1/I) are
/// excluded so the identifier survives being read aloud or handwritten.
const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

const SEGMENT_LENGTH: usize = 4;
const PREFIX: &str = "GRV";

/// Human-shareable grievance identifier in the form `GRV-XXXX-XXXX`.
///
/// Two 4-symbol segments over a 32-symbol alphabet give 40 bits of entropy;
/// the persistence layer still enforces uniqueness as a hard constraint and
/// the lifecycle service regenerates on the rare collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(String);

impl TrackingId {
    /// Generates a fresh random tracking identifier.
    pub fn generate() -> AppResult<Self> {
        let mut bytes = [0u8; SEGMENT_LENGTH * 2];
        getrandom::fill(&mut bytes).map_err(|error| {
            AppError::Internal(format!("failed to generate tracking id: {error}"))
        })?;

        let mut value = String::with_capacity(PREFIX.len() + 2 + SEGMENT_LENGTH * 2);
        value.push_str(PREFIX);
        for (index, byte) in bytes.iter().enumerate() {
            if index % SEGMENT_LENGTH == 0 {
                value.push('-');
            }
            value.push(char::from(ALPHABET[usize::from(*byte) % ALPHABET.len()]));
        }

        Ok(Self(value))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TrackingId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        let mut segments = normalized.split('-');

        let well_formed = segments.next() == Some(PREFIX)
            && segments
                .clone()
                .all(|segment| {
                    segment.len() == SEGMENT_LENGTH
                        && segment.bytes().all(|byte| ALPHABET.contains(&byte))
                })
            && segments.count() == 2;

        if !well_formed {
            return Err(AppError::Validation(format!(
                "malformed tracking id '{value}'"
            )));
        }

        Ok(Self(normalized))
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::TrackingId;

    #[test]
    fn generated_ids_have_the_shareable_shape() {
        let id = TrackingId::generate().unwrap_or_else(|_| unreachable!());
        let reparsed = TrackingId::from_str(id.as_str());
        assert_eq!(reparsed.ok().as_ref(), Some(&id));
    }

    #[test]
    fn ten_thousand_generated_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let id = TrackingId::generate().unwrap_or_else(|_| unreachable!());
            assert!(seen.insert(id.as_str().to_owned()), "duplicate {id}");
        }
    }

    #[test]
    fn lookup_parsing_normalizes_case_and_whitespace() {
        let parsed = TrackingId::from_str("  grv-ab23-wx9z ");
        assert_eq!(
            parsed.map(|id| id.as_str().to_owned()).as_deref(),
            Ok("GRV-AB23-WX9Z")
        );
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for candidate in ["GRV-AB23", "TKT-AB23-WX9Z", "GRV-AB1O-WX9Z", ""] {
            assert!(TrackingId::from_str(candidate).is_err(), "{candidate}");
        }
    }
}
