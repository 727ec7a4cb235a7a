//! CSV Data Loader Module
//! Loads the registration CSV with Polars and extracts typed records.

use crate::data::record::{
    VehicleRecord, CAFV_ALIASES, CITY_ALIASES, ELECTRIC_RANGE_ALIASES, ELECTRIC_UTILITY_ALIASES,
    EV_TYPE_ALIASES, MAKE_ALIASES, MODEL_ALIASES, MODEL_YEAR_ALIASES,
};
use log::{info, warn};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Read the CSV at `path` and materialize the full record sequence.
///
/// Parsing is delegated to Polars: first row is the header, values are
/// type-inferred, empty lines are skipped. Rows that fail inference are
/// tolerated (`ignore_errors`); a file-level failure is the only error.
pub fn read_records(path: &str) -> Result<Vec<VehicleRecord>, LoaderError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    info!(
        "loaded {} rows, {} columns from {}",
        df.height(),
        df.width(),
        path
    );
    Ok(records_from_dataframe(&df))
}

/// Extract typed records from a loaded DataFrame.
///
/// Header aliases are resolved here, once; a column missing under every
/// accepted spelling leaves that field `None` on all records.
pub fn records_from_dataframe(df: &DataFrame) -> Vec<VehicleRecord> {
    let makes = string_column(df, MAKE_ALIASES);
    let models = string_column(df, MODEL_ALIASES);
    let years = numeric_column(df, MODEL_YEAR_ALIASES);
    let ev_types = string_column(df, EV_TYPE_ALIASES);
    let cafv = string_column(df, CAFV_ALIASES);
    let ranges = numeric_column(df, ELECTRIC_RANGE_ALIASES);
    let cities = string_column(df, CITY_ALIASES);
    let utilities = string_column(df, ELECTRIC_UTILITY_ALIASES);

    for (missing, name) in [
        (makes.is_none(), "Make"),
        (models.is_none(), "Model"),
        (years.is_none(), "Model Year"),
        (ev_types.is_none(), "Electric Vehicle Type"),
        (cafv.is_none(), "CAFV Eligibility"),
        (ranges.is_none(), "Electric Range"),
        (cities.is_none(), "City"),
        (utilities.is_none(), "Electric Utility"),
    ] {
        if missing {
            warn!("column not found under any accepted header: {}", name);
        }
    }

    (0..df.height())
        .map(|i| VehicleRecord {
            make: string_at(&makes, i),
            model: string_at(&models, i),
            model_year: numeric_at(&years, i).map(|y| y as i32),
            ev_type: string_at(&ev_types, i),
            cafv_eligibility: string_at(&cafv, i),
            electric_range: numeric_at(&ranges, i),
            city: string_at(&cities, i),
            electric_utility: string_at(&utilities, i),
        })
        .collect()
}

fn find_column<'a>(df: &'a DataFrame, aliases: &[&str]) -> Option<&'a Column> {
    aliases.iter().find_map(|name| df.column(name).ok())
}

/// Column as owned strings, with empty values normalized to `None`.
fn string_column(df: &DataFrame, aliases: &[&str]) -> Option<Vec<Option<String>>> {
    let casted = find_column(df, aliases)?.cast(&DataType::String).ok()?;
    let ca = casted.str().ok()?;
    Some(
        ca.into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
            .collect(),
    )
}

/// Column as f64, with values that fail the cast left as `None`.
fn numeric_column(df: &DataFrame, aliases: &[&str]) -> Option<Vec<Option<f64>>> {
    let casted = find_column(df, aliases)?.cast(&DataType::Float64).ok()?;
    let ca = casted.f64().ok()?;
    Some(ca.into_iter().collect())
}

fn string_at(column: &Option<Vec<Option<String>>>, i: usize) -> Option<String> {
    column.as_ref()?.get(i)?.clone()
}

fn numeric_at(column: &Option<Vec<Option<f64>>>, i: usize) -> Option<f64> {
    *column.as_ref()?.get(i)?
}

/// Session-scoped holder for the loaded record sequence.
///
/// The sequence is created once per file and never mutated afterwards; the
/// `Arc` lets views re-run aggregations against the same immutable data.
pub struct DataLoader {
    records: Arc<Vec<VehicleRecord>>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            file_path: None,
        }
    }

    /// Load a CSV file synchronously.
    pub fn load_csv(&mut self, file_path: &str) -> Result<Arc<Vec<VehicleRecord>>, LoaderError> {
        let records = read_records(file_path)?;
        self.set_records(records, Some(PathBuf::from(file_path)));
        Ok(self.records())
    }

    /// Install records directly (used when loading on a background thread).
    pub fn set_records(&mut self, records: Vec<VehicleRecord>, file_path: Option<PathBuf>) {
        self.records = Arc::new(records);
        if file_path.is_some() {
            self.file_path = file_path;
        }
    }

    pub fn records(&self) -> Arc<Vec<VehicleRecord>> {
        Arc::clone(&self.records)
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
