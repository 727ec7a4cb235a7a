//! City extraction from the free-text `Electric Utility` field.
//!
//! Some utility values embed city names in the pattern `CITY OF <NAME> -`.
//! The extraction is lexical and knowingly lossy: any occurrence of the
//! pattern counts, names are limited to letters and whitespace, and one
//! record may increment several city counters. That mirrors the real
//! ambiguity of the source field and is preserved as-is.

use crate::data::VehicleRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Bucket for utility strings naming the Puget Sound regional utility
/// without an embedded city.
pub const PUGET_SOUND_BUCKET: &str = "PUGET SOUND REGION";
/// Catch-all bucket for utility strings with no recognizable location.
pub const OTHER_BUCKET: &str = "OTHER";

const PUGET_SOUND_MARKER: &str = "PUGET SOUND";

fn city_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"CITY OF ([A-Za-z\s]+) -").expect("literal pattern"))
}

/// Every embedded city name in one utility string, in match order, with
/// surrounding whitespace trimmed. Case-sensitive, matching the dataset's
/// uppercase convention.
pub fn extract_cities(utility: &str) -> Vec<String> {
    city_pattern()
        .captures_iter(utility)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Count registrations per extracted city bucket.
///
/// A record with no embedded city falls back to [`PUGET_SOUND_BUCKET`] if
/// the string mentions the regional utility, else [`OTHER_BUCKET`]. Records
/// with a missing or empty utility field are excluded entirely.
pub fn utility_city_counts(records: &[VehicleRecord]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for utility in records.iter().filter_map(|r| r.electric_utility.as_deref()) {
        let cities = extract_cities(utility);
        if cities.is_empty() {
            let bucket = if utility.contains(PUGET_SOUND_MARKER) {
                PUGET_SOUND_BUCKET
            } else {
                OTHER_BUCKET
            };
            *counts.entry(bucket.to_string()).or_insert(0) += 1;
        } else {
            for city in cities {
                *counts.entry(city).or_insert(0) += 1;
            }
        }
    }
    counts
}
