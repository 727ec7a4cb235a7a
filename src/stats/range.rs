//! Per-model electric-range statistics.
//!
//! All functions first restrict to records with a strictly-positive numeric
//! range; zero and absent both mean "unknown" in the source data and must
//! not contribute to any statistic here.

use crate::data::VehicleRecord;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Groups below this sample size are dropped from spread views, where a
/// standard deviation over a couple of vehicles is noise.
pub const MIN_SAMPLES_FOR_SPREAD: usize = 5;

/// Model years outside this window are treated as data-entry errors by the
/// trend view.
pub const MODEL_YEAR_MIN: i32 = 1990;
pub const MODEL_YEAR_MAX: i32 = 2030;

/// Range statistics for one model's valid-range vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeStats {
    pub model: String,
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor N). A single-member group
    /// has spread 0, not NaN.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Sum of all ranges in the group.
    pub total: f64,
}

/// One vehicle in a longest-range ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangedVehicle {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<i32>,
    pub electric_range: f64,
}

/// Group valid-range records by model and summarize each group.
///
/// Output is ordered by model name ascending; the sort helpers below
/// reorder for specific views. Group summaries run in parallel.
pub fn range_stats_by_model(records: &[VehicleRecord]) -> Vec<RangeStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        let (Some(model), Some(range)) = (record.model.as_deref(), record.positive_range()) else {
            continue;
        };
        groups.entry(model).or_default().push(range);
    }

    let entries: Vec<(&str, Vec<f64>)> = groups.into_iter().collect();
    entries
        .par_iter()
        .map(|(model, ranges)| summarize(model, ranges))
        .collect()
}

fn summarize(model: &str, ranges: &[f64]) -> RangeStats {
    let n = ranges.len();
    debug_assert!(n > 0);

    let total: f64 = ranges.iter().sum();
    let mean = total / n as f64;
    let variance = ranges.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n as f64;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &r in ranges {
        min = min.min(r);
        max = max.max(r);
    }

    RangeStats {
        model: model.to_string(),
        count: n,
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        total,
    }
}

/// Keep only groups with at least `min_samples` vehicles.
pub fn retain_min_samples(mut stats: Vec<RangeStats>, min_samples: usize) -> Vec<RangeStats> {
    stats.retain(|s| s.count >= min_samples);
    stats
}

/// Order for spread views: standard deviation descending.
pub fn sort_by_spread(stats: &mut [RangeStats]) {
    stats.sort_by(|a, b| {
        b.std_dev
            .partial_cmp(&a.std_dev)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.model.cmp(&b.model))
    });
}

/// Order for top-average-range views: mean descending.
pub fn sort_by_mean_range(stats: &mut [RangeStats]) {
    stats.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.model.cmp(&b.model))
    });
}

/// The `n` most common models among valid-range records, count descending.
/// Feeds the model-selection dropdowns.
pub fn most_common_models(stats: &[RangeStats], n: usize) -> Vec<String> {
    let mut ordered: Vec<&RangeStats> = stats.iter().collect();
    ordered.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.model.cmp(&b.model)));
    ordered.into_iter().take(n).map(|s| s.model.clone()).collect()
}

/// The `n` vehicles with the longest range, descending, optionally
/// restricted to one model. Equal ranges keep dataset order.
pub fn longest_range_vehicles(
    records: &[VehicleRecord],
    model: Option<&str>,
    n: usize,
) -> Vec<RangedVehicle> {
    let mut vehicles: Vec<RangedVehicle> = records
        .iter()
        .filter(|r| match model {
            Some(wanted) => r.model.as_deref() == Some(wanted),
            None => true,
        })
        .filter_map(|r| {
            let range = r.positive_range()?;
            Some(RangedVehicle {
                make: r.make.clone(),
                model: r.model.clone(),
                model_year: r.model_year,
                electric_range: range,
            })
        })
        .collect();

    vehicles.sort_by(|a, b| {
        b.electric_range
            .partial_cmp(&a.electric_range)
            .unwrap_or(Ordering::Equal)
    });
    vehicles.truncate(n);
    vehicles
}

/// Summary for one model's stat cards; `None` when the model has no
/// valid-range vehicles.
pub fn model_range_summary(records: &[VehicleRecord], model: &str) -> Option<RangeStats> {
    let ranges: Vec<f64> = records
        .iter()
        .filter(|r| r.model.as_deref() == Some(model))
        .filter_map(|r| r.positive_range())
        .collect();
    if ranges.is_empty() {
        return None;
    }
    Some(summarize(model, &ranges))
}

/// Registrations per year for one model, years ascending, bounded to the
/// plausible model-year window.
pub fn model_year_trend(records: &[VehicleRecord], model: &str) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if record.model.as_deref() != Some(model) {
            continue;
        }
        let Some(year) = record.model_year else {
            continue;
        };
        if !(MODEL_YEAR_MIN..=MODEL_YEAR_MAX).contains(&year) {
            continue;
        }
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}
