//! Charts module - chart widgets, palette, static export

mod export;
mod palette;
mod plotter;

pub use export::{export_chart_pngs, export_summary_json};
pub use palette::{color_for, heat_color, series_color, ACCENT, PALETTE};
pub use plotter::ChartPlotter;

use crate::data::VehicleRecord;
use crate::stats::{
    self, FleetSummary, RangeStats, RangedVehicle, TypeCounts,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ranking sizes used by the dashboard views.
pub const TOP_MAKES: usize = 10;
pub const TOP_MODELS: usize = 10;
pub const TOP_CITIES: usize = 10;
pub const TOP_VEHICLES: usize = 10;
pub const HEAT_GRID_CITIES: usize = 20;
pub const DROPDOWN_MODELS: usize = 20;

/// Every aggregation the dashboard renders, computed in one pass over the
/// record sequence. Plain serializable data, no presentation concerns; the
/// JSON exporter writes it verbatim.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub summary: FleetSummary,
    pub registrations_by_year: BTreeMap<i32, u64>,
    pub top_makes: Vec<(String, u64)>,
    pub top_models: Vec<(String, u64)>,
    pub top_cities: Vec<(String, u64)>,
    /// CAFV eligibility categories, count descending.
    pub cafv_shares: Vec<(String, u64)>,
    pub type_counts_by_year: BTreeMap<i32, TypeCounts>,
    pub cafv_top_models: Vec<(String, u64)>,
    pub cafv_top_makes: Vec<(String, u64)>,
    pub cafv_type_split: Vec<(String, u64)>,
    /// Utility-derived city buckets, count descending.
    pub utility_cities: Vec<(String, u64)>,
    /// Range spread per model, std-dev descending, small groups dropped.
    pub range_by_spread: Vec<RangeStats>,
    /// Mean range per model, mean descending.
    pub range_by_mean: Vec<RangeStats>,
    /// Dropdown feed for the range views: most common valid-range models.
    pub range_models: Vec<String>,
    /// Dropdown feed for the trend view: most common models overall.
    pub trend_models: Vec<String>,
    /// Longest-range vehicles across all models.
    pub top_range_vehicles: Vec<RangedVehicle>,
}

impl DashboardData {
    /// Run every aggregation against `records`. `min_spread_samples` is the
    /// smallest group size admitted to the spread view.
    pub fn compute(records: &[VehicleRecord], min_spread_samples: usize) -> Self {
        let make_counts = stats::make_counts(records);
        let model_counts = stats::model_counts(records);
        let city_counts = stats::city_counts(records);
        let cafv_counts = stats::cafv_counts(records);
        let cafv_model_counts = stats::cafv_eligible_counts(records, |r| r.model.as_deref());
        let cafv_make_counts = stats::cafv_eligible_counts(records, |r| r.make.as_deref());
        let utility_counts = stats::utility_city_counts(records);

        let range_stats = stats::range_stats_by_model(records);
        let range_models = stats::most_common_models(&range_stats, DROPDOWN_MODELS);

        let mut range_by_spread =
            stats::retain_min_samples(range_stats.clone(), min_spread_samples);
        stats::sort_by_spread(&mut range_by_spread);

        let mut range_by_mean = range_stats;
        stats::sort_by_mean_range(&mut range_by_mean);

        Self {
            summary: stats::fleet_summary(records),
            registrations_by_year: stats::registrations_by_year(records),
            top_makes: stats::top_n(&make_counts, TOP_MAKES),
            top_models: stats::top_n(&model_counts, TOP_MODELS),
            top_cities: stats::top_n(&city_counts, TOP_CITIES),
            cafv_shares: stats::top_n(&cafv_counts, cafv_counts.len()),
            type_counts_by_year: stats::type_counts_by_year(records),
            cafv_top_models: stats::top_n(&cafv_model_counts, TOP_MODELS),
            cafv_top_makes: stats::top_n(&cafv_make_counts, TOP_MAKES),
            cafv_type_split: stats::cafv_eligible_type_split(records),
            utility_cities: stats::top_n(&utility_counts, utility_counts.len()),
            range_by_spread,
            range_by_mean,
            range_models,
            trend_models: stats::top_n(&model_counts, DROPDOWN_MODELS)
                .into_iter()
                .map(|(model, _)| model)
                .collect(),
            top_range_vehicles: stats::longest_range_vehicles(records, None, TOP_VEHICLES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total_records == 0
    }
}
