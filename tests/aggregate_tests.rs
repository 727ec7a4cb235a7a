use evdash::data::{VehicleRecord, BEV_LABEL, CAFV_ELIGIBLE_LABEL, PHEV_LABEL};
use evdash::stats::{
    cafv_eligible_type_split, count_by, fleet_summary, registrations_by_year, top_n,
    type_counts_by_year, TypeCounts,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn typed_record(year: i32, ev_type: &str) -> VehicleRecord {
    VehicleRecord {
        model_year: Some(year),
        ev_type: Some(ev_type.to_string()),
        ..Default::default()
    }
}

#[test]
fn count_by_excludes_missing_values() {
    let records = vec![
        VehicleRecord {
            make: Some("TESLA".to_string()),
            ..Default::default()
        },
        VehicleRecord {
            make: Some("TESLA".to_string()),
            ..Default::default()
        },
        VehicleRecord {
            make: Some("NISSAN".to_string()),
            ..Default::default()
        },
        VehicleRecord::default(),
    ];

    let counts = count_by(&records, |r| r.make.as_deref());

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["TESLA"], 2);
    assert_eq!(counts["NISSAN"], 1);
    // Counts sum to the records that actually carry the field.
    assert_eq!(counts.values().sum::<u64>(), 3);
}

#[test]
fn top_n_orders_truncates_and_breaks_ties_by_key() {
    let mut counts = HashMap::new();
    counts.insert("LEAF".to_string(), 5);
    counts.insert("MODEL 3".to_string(), 9);
    counts.insert("BOLT EV".to_string(), 5);
    counts.insert("NIRO".to_string(), 1);

    let ranked = top_n(&counts, 3);

    assert_eq!(
        ranked,
        vec![
            ("MODEL 3".to_string(), 9),
            ("BOLT EV".to_string(), 5),
            ("LEAF".to_string(), 5),
        ]
    );
}

#[test]
fn top_n_is_subset_with_matching_counts() {
    let mut counts = HashMap::new();
    for (key, count) in [("A", 4), ("B", 7), ("C", 2)] {
        counts.insert(key.to_string(), count);
    }

    let ranked = top_n(&counts, 10);

    assert_eq!(ranked.len(), 3);
    for (key, count) in &ranked {
        assert_eq!(counts[key], *count);
    }
}

#[test]
fn registrations_by_year_is_ascending() {
    let records = vec![
        typed_record(2022, BEV_LABEL),
        typed_record(2019, BEV_LABEL),
        typed_record(2022, PHEV_LABEL),
        VehicleRecord::default(),
    ];

    let by_year = registrations_by_year(&records);

    let years: Vec<i32> = by_year.keys().copied().collect();
    assert_eq!(years, vec![2019, 2022]);
    assert_eq!(by_year[&2022], 2);
    assert_eq!(by_year[&2019], 1);
}

#[test]
fn type_counts_by_year_cross_tab() {
    let records = vec![
        typed_record(2020, BEV_LABEL),
        typed_record(2020, PHEV_LABEL),
        typed_record(2021, "X"),
    ];

    let table = type_counts_by_year(&records);

    assert_eq!(
        table[&2020],
        TypeCounts {
            bev: 1,
            phev: 1,
            other: 0
        }
    );
    assert_eq!(
        table[&2021],
        TypeCounts {
            bev: 0,
            phev: 0,
            other: 1
        }
    );
}

#[test]
fn type_counts_skip_records_missing_year_or_type() {
    let records = vec![
        typed_record(2020, BEV_LABEL),
        VehicleRecord {
            ev_type: Some(BEV_LABEL.to_string()),
            ..Default::default()
        },
        VehicleRecord {
            model_year: Some(2020),
            ..Default::default()
        },
    ];

    let table = type_counts_by_year(&records);

    assert_eq!(table.len(), 1);
    assert_eq!(table[&2020].bev, 1);
}

#[test]
fn fleet_summary_counts_and_average() {
    let mut bev = typed_record(2020, BEV_LABEL);
    bev.electric_range = Some(200.0);
    let mut phev = typed_record(2021, PHEV_LABEL);
    phev.electric_range = Some(30.0);
    let mut unknown_range = typed_record(2021, BEV_LABEL);
    unknown_range.electric_range = Some(0.0);

    let summary = fleet_summary(&[bev, phev, unknown_range]);

    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.bev_count, 2);
    assert_eq!(summary.phev_count, 1);
    assert_eq!(
        summary.ev_types,
        vec![BEV_LABEL.to_string(), PHEV_LABEL.to_string()]
    );
    // Zero range means unknown and is excluded from the average.
    assert_eq!(summary.avg_range, Some(115.0));
}

#[test]
fn fleet_summary_empty_input() {
    let summary = fleet_summary(&[]);

    assert_eq!(summary.total_records, 0);
    assert_eq!(summary.bev_count, 0);
    assert_eq!(summary.phev_count, 0);
    assert!(summary.ev_types.is_empty());
    assert_eq!(summary.avg_range, None);
}

#[test]
fn cafv_type_split_keeps_only_eligible_bev_and_phev() {
    let eligible_bev = VehicleRecord {
        ev_type: Some(BEV_LABEL.to_string()),
        cafv_eligibility: Some(CAFV_ELIGIBLE_LABEL.to_string()),
        ..Default::default()
    };
    let eligible_phev = VehicleRecord {
        ev_type: Some(PHEV_LABEL.to_string()),
        cafv_eligibility: Some(CAFV_ELIGIBLE_LABEL.to_string()),
        ..Default::default()
    };
    let eligible_other = VehicleRecord {
        ev_type: Some("Fuel Cell".to_string()),
        cafv_eligibility: Some(CAFV_ELIGIBLE_LABEL.to_string()),
        ..Default::default()
    };
    let ineligible_bev = VehicleRecord {
        ev_type: Some(BEV_LABEL.to_string()),
        cafv_eligibility: Some("Not eligible due to low battery range".to_string()),
        ..Default::default()
    };

    let split = cafv_eligible_type_split(&[
        eligible_bev.clone(),
        eligible_bev,
        eligible_phev,
        eligible_other,
        ineligible_bev,
    ]);

    assert_eq!(
        split,
        vec![(BEV_LABEL.to_string(), 2), (PHEV_LABEL.to_string(), 1)]
    );
}

#[test]
fn empty_input_yields_empty_outputs_everywhere() {
    let records: Vec<VehicleRecord> = Vec::new();

    assert!(count_by(&records, |r| r.make.as_deref()).is_empty());
    assert!(top_n(&HashMap::new(), 10).is_empty());
    assert!(registrations_by_year(&records).is_empty());
    assert!(type_counts_by_year(&records).is_empty());
    assert!(cafv_eligible_type_split(&records).is_empty());
}
