//! Stats module - pure aggregations over the record sequence

mod aggregate;
mod city;
mod range;

pub use aggregate::{
    cafv_counts, cafv_eligible_counts, cafv_eligible_type_split, city_counts, count_by,
    fleet_summary, make_counts, model_counts, registrations_by_year, top_n, type_counts_by_year,
    FleetSummary, TypeCounts,
};
pub use city::{extract_cities, utility_city_counts, OTHER_BUCKET, PUGET_SOUND_BUCKET};
pub use range::{
    longest_range_vehicles, model_range_summary, model_year_trend, most_common_models,
    range_stats_by_model, retain_min_samples, sort_by_mean_range, sort_by_spread, RangeStats,
    RangedVehicle, MIN_SAMPLES_FOR_SPREAD, MODEL_YEAR_MAX, MODEL_YEAR_MIN,
};
