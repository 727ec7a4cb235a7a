//! evdash
//!
//! Dashboard for a CSV dataset of electric-vehicle registrations: load the
//! file once, derive a fixed set of aggregate statistics (counts by year,
//! make, model, city, CAFV eligibility, vehicle type, electric range), and
//! render each aggregation as a chart or table.
//!
//! The interesting part lives in [`stats`]: pure, independent
//! transformations from the flat record sequence to grouped, ranked and
//! summarized views. [`data`] loads and types the CSV, [`charts`] draws,
//! [`gui`] is the eframe shell.

pub mod charts;
pub mod data;
pub mod gui;
pub mod stats;
