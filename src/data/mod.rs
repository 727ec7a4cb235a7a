//! Data module - CSV loading and record extraction

mod loader;
mod record;

pub use loader::{read_records, records_from_dataframe, DataLoader, LoaderError};
pub use record::{VehicleRecord, BEV_LABEL, CAFV_ELIGIBLE_LABEL, PHEV_LABEL};
