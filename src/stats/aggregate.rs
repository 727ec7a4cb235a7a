//! Categorical counting, ranking and cross-tabulation.
//!
//! Every function here is a pure read over the full record slice; records
//! that fail a function's validity predicate are excluded from that result
//! only, never surfaced as errors. All functions return empty outputs for
//! an empty slice.

use crate::data::{VehicleRecord, BEV_LABEL, PHEV_LABEL};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Count occurrences of each distinct value of one categorical field.
///
/// Records where the accessor yields `None` are excluded from the tally;
/// no synthetic key is invented for them.
pub fn count_by<F>(records: &[VehicleRecord], field: F) -> HashMap<String, u64>
where
    F: Fn(&VehicleRecord) -> Option<&str>,
{
    let mut counts = HashMap::new();
    for value in records.iter().filter_map(field) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn make_counts(records: &[VehicleRecord]) -> HashMap<String, u64> {
    count_by(records, |r| r.make.as_deref())
}

pub fn model_counts(records: &[VehicleRecord]) -> HashMap<String, u64> {
    count_by(records, |r| r.model.as_deref())
}

pub fn city_counts(records: &[VehicleRecord]) -> HashMap<String, u64> {
    count_by(records, |r| r.city.as_deref())
}

pub fn cafv_counts(records: &[VehicleRecord]) -> HashMap<String, u64> {
    count_by(records, |r| r.cafv_eligibility.as_deref())
}

/// The `n` highest-count entries, count descending.
///
/// Ties break on key ascending so rankings are reproducible across runs.
pub fn top_n(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Registrations per model year, years ascending. Records without a year
/// are excluded.
pub fn registrations_by_year(records: &[VehicleRecord]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.model_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Per-year breakdown of vehicle types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub bev: u64,
    pub phev: u64,
    pub other: u64,
}

/// Cross-tabulate model year against vehicle type, years ascending.
///
/// `other` collects every type label that is not exactly the BEV or PHEV
/// category string. Records missing either field are excluded.
pub fn type_counts_by_year(records: &[VehicleRecord]) -> BTreeMap<i32, TypeCounts> {
    let mut table: BTreeMap<i32, TypeCounts> = BTreeMap::new();
    for record in records {
        let (Some(year), Some(ev_type)) = (record.model_year, record.ev_type.as_deref()) else {
            continue;
        };
        let entry = table.entry(year).or_default();
        match ev_type {
            BEV_LABEL => entry.bev += 1,
            PHEV_LABEL => entry.phev += 1,
            _ => entry.other += 1,
        }
    }
    table
}

/// Headline numbers for the summary strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total_records: usize,
    /// Distinct type labels in first-seen order.
    pub ev_types: Vec<String>,
    pub bev_count: u64,
    pub phev_count: u64,
    /// Mean over strictly-positive ranges; `None` when no record has one.
    pub avg_range: Option<f64>,
}

pub fn fleet_summary(records: &[VehicleRecord]) -> FleetSummary {
    let mut summary = FleetSummary {
        total_records: records.len(),
        ..Default::default()
    };

    let mut range_sum = 0.0;
    let mut range_count = 0usize;
    for record in records {
        if let Some(ev_type) = record.ev_type.as_deref() {
            if !summary.ev_types.iter().any(|t| t == ev_type) {
                summary.ev_types.push(ev_type.to_string());
            }
        }
        if record.is_bev() {
            summary.bev_count += 1;
        } else if record.is_phev() {
            summary.phev_count += 1;
        }
        if let Some(range) = record.positive_range() {
            range_sum += range;
            range_count += 1;
        }
    }

    if range_count > 0 {
        summary.avg_range = Some(range_sum / range_count as f64);
    }
    summary
}

/// Count one categorical field over CAFV-eligible records only.
pub fn cafv_eligible_counts<F>(records: &[VehicleRecord], field: F) -> HashMap<String, u64>
where
    F: Fn(&VehicleRecord) -> Option<&str>,
{
    let mut counts = HashMap::new();
    for record in records.iter().filter(|r| r.is_cafv_eligible()) {
        if let Some(value) = field(record) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// BEV vs PHEV split among CAFV-eligible records, keyed by the full type
/// label. Labels naming neither family are dropped, matching the source
/// dashboard's donut.
pub fn cafv_eligible_type_split(records: &[VehicleRecord]) -> Vec<(String, u64)> {
    let counts = cafv_eligible_counts(records, |r| {
        r.ev_type
            .as_deref()
            .filter(|t| t.contains("BEV") || t.contains("PHEV"))
    });
    top_n(&counts, counts.len())
}
