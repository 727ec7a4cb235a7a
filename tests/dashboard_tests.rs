use evdash::charts::DashboardData;
use evdash::data::{VehicleRecord, BEV_LABEL, CAFV_ELIGIBLE_LABEL, PHEV_LABEL};
use evdash::stats::MIN_SAMPLES_FOR_SPREAD;
use pretty_assertions::assert_eq;

fn registration(make: &str, model: &str, year: i32, ev_type: &str, range: f64) -> VehicleRecord {
    VehicleRecord {
        make: Some(make.to_string()),
        model: Some(model.to_string()),
        model_year: Some(year),
        ev_type: Some(ev_type.to_string()),
        cafv_eligibility: Some(CAFV_ELIGIBLE_LABEL.to_string()),
        electric_range: Some(range),
        city: Some("SEATTLE".to_string()),
        electric_utility: Some("CITY OF SEATTLE - (WA)".to_string()),
    }
}

fn sample_fleet() -> Vec<VehicleRecord> {
    let mut records = Vec::new();
    for _ in 0..5 {
        records.push(registration("TESLA", "MODEL 3", 2020, BEV_LABEL, 100.0));
    }
    records.push(registration("TOYOTA", "PRIUS PRIME", 2021, PHEV_LABEL, 25.0));
    records
}

#[test]
fn compute_on_empty_input_is_empty() {
    let data = DashboardData::compute(&[], MIN_SAMPLES_FOR_SPREAD);

    assert!(data.is_empty());
    assert!(data.registrations_by_year.is_empty());
    assert!(data.top_makes.is_empty());
    assert!(data.cafv_shares.is_empty());
    assert!(data.type_counts_by_year.is_empty());
    assert!(data.utility_cities.is_empty());
    assert!(data.range_by_spread.is_empty());
    assert!(data.range_models.is_empty());
    assert!(data.top_range_vehicles.is_empty());
}

#[test]
fn compute_populates_every_view() {
    let data = DashboardData::compute(&sample_fleet(), MIN_SAMPLES_FOR_SPREAD);

    assert_eq!(data.summary.total_records, 6);
    assert_eq!(data.summary.bev_count, 5);
    assert_eq!(data.summary.phev_count, 1);

    assert_eq!(data.top_makes[0], ("TESLA".to_string(), 5));
    assert_eq!(data.top_models[0], ("MODEL 3".to_string(), 5));
    assert_eq!(data.registrations_by_year[&2020], 5);
    assert_eq!(data.type_counts_by_year[&2021].phev, 1);
    assert_eq!(data.utility_cities[0], ("SEATTLE".to_string(), 6));
    assert_eq!(data.cafv_top_makes[0], ("TESLA".to_string(), 5));

    // Only the five identical MODEL 3s clear the spread threshold; their
    // identical ranges give a spread of exactly zero.
    assert_eq!(data.range_by_spread.len(), 1);
    let spread = &data.range_by_spread[0];
    assert_eq!(spread.model, "MODEL 3");
    assert_eq!(spread.count, 5);
    assert_eq!(spread.mean, 100.0);
    assert_eq!(spread.std_dev, 0.0);
    assert_eq!(spread.min, 100.0);
    assert_eq!(spread.max, 100.0);

    assert_eq!(data.range_models[0], "MODEL 3");
    assert!(data.trend_models.contains(&"PRIUS PRIME".to_string()));
    assert_eq!(data.top_range_vehicles.len(), 6);
    assert_eq!(data.top_range_vehicles[0].electric_range, 100.0);
}

#[test]
fn aggregate_bundle_serializes_to_json() {
    let data = DashboardData::compute(&sample_fleet(), MIN_SAMPLES_FOR_SPREAD);

    let json = serde_json::to_string(&data).expect("serializable bundle");
    assert!(json.contains("\"total_records\":6"));
    assert!(json.contains("MODEL 3"));
}
