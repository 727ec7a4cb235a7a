//! Typed registration records extracted from the raw CSV.

use serde::Serialize;

/// `Electric Vehicle Type` value for battery-electric vehicles.
pub const BEV_LABEL: &str = "Battery Electric Vehicle (BEV)";
/// `Electric Vehicle Type` value for plug-in hybrids.
pub const PHEV_LABEL: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";
/// CAFV eligibility value selecting the eligible-only views.
pub const CAFV_ELIGIBLE_LABEL: &str = "Clean Alternative Fuel Vehicle Eligible";

/// Accepted header spellings per canonical field. Resolved once at load
/// time; aggregations never re-check alternatives.
pub const MAKE_ALIASES: &[&str] = &["Make"];
pub const MODEL_ALIASES: &[&str] = &["Model"];
pub const MODEL_YEAR_ALIASES: &[&str] = &["Model Year", "ModelYear", "Year"];
pub const EV_TYPE_ALIASES: &[&str] = &["Electric Vehicle Type"];
pub const CAFV_ALIASES: &[&str] = &["Clean Alternative Fuel Vehicle (CAFV) Eligibility"];
pub const ELECTRIC_RANGE_ALIASES: &[&str] = &["Electric Range"];
pub const CITY_ALIASES: &[&str] = &["City"];
pub const ELECTRIC_UTILITY_ALIASES: &[&str] = &["Electric Utility"];

/// One row of the registration dataset. Every field is optional: the CSV
/// may omit columns, and empty values are normalized to `None` at load.
/// Grouping keys keep the literal field value, no case folding or trimming.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<i32>,
    pub ev_type: Option<String>,
    pub cafv_eligibility: Option<String>,
    pub electric_range: Option<f64>,
    pub city: Option<String>,
    pub electric_utility: Option<String>,
}

impl VehicleRecord {
    /// Electric range usable in statistics. Zero or absent means the range
    /// is unknown, not that the vehicle has zero range.
    pub fn positive_range(&self) -> Option<f64> {
        self.electric_range.filter(|r| *r > 0.0)
    }

    pub fn is_bev(&self) -> bool {
        self.ev_type.as_deref() == Some(BEV_LABEL)
    }

    pub fn is_phev(&self) -> bool {
        self.ev_type.as_deref() == Some(PHEV_LABEL)
    }

    pub fn is_cafv_eligible(&self) -> bool {
        self.cafv_eligibility.as_deref() == Some(CAFV_ELIGIBLE_LABEL)
    }
}
