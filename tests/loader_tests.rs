use evdash::data::{read_records, BEV_LABEL};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn loads_typed_records() {
    let csv = "\
Make,Model,Model Year,Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,City,Electric Utility
TESLA,MODEL 3,2020,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,215,SEATTLE,CITY OF SEATTLE - (WA)
NISSAN,LEAF,2019,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,0,TACOMA,PUGET SOUND ENERGY INC
";
    let file = write_csv(csv);

    let records = read_records(file.path().to_str().unwrap()).expect("load");

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.make.as_deref(), Some("TESLA"));
    assert_eq!(first.model.as_deref(), Some("MODEL 3"));
    assert_eq!(first.model_year, Some(2020));
    assert_eq!(first.ev_type.as_deref(), Some(BEV_LABEL));
    assert_eq!(first.electric_range, Some(215.0));
    assert_eq!(first.city.as_deref(), Some("SEATTLE"));
    assert_eq!(
        first.electric_utility.as_deref(),
        Some("CITY OF SEATTLE - (WA)")
    );
    // Zero survives the load; range validity is each aggregation's call.
    assert_eq!(records[1].electric_range, Some(0.0));
    assert_eq!(records[1].positive_range(), None);
}

#[test]
fn empty_fields_become_none() {
    let csv = "\
Make,Model,Model Year,Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,City,Electric Utility
,MODEL 3,2020,,,,SEATTLE,
";
    let file = write_csv(csv);

    let records = read_records(file.path().to_str().unwrap()).expect("load");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.make, None);
    assert_eq!(record.model.as_deref(), Some("MODEL 3"));
    assert_eq!(record.ev_type, None);
    assert_eq!(record.cafv_eligibility, None);
    assert_eq!(record.electric_range, None);
    assert_eq!(record.electric_utility, None);
}

#[test]
fn header_aliases_are_normalized() {
    let csv = "\
Make,Model,ModelYear,Electric Range
TESLA,MODEL Y,2022,330
";
    let file = write_csv(csv);

    let records = read_records(file.path().to_str().unwrap()).expect("load");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].model_year, Some(2022));
    assert_eq!(records[0].electric_range, Some(330.0));
}

#[test]
fn missing_columns_degrade_per_field() {
    let csv = "\
Make,Model
TESLA,MODEL 3
NISSAN,LEAF
";
    let file = write_csv(csv);

    let records = read_records(file.path().to_str().unwrap()).expect("load");

    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.make.is_some());
        assert_eq!(record.model_year, None);
        assert_eq!(record.electric_range, None);
        assert_eq!(record.city, None);
    }
}

#[test]
fn header_only_file_yields_no_records() {
    let csv = "Make,Model,Model Year\n";
    let file = write_csv(csv);

    let records = read_records(file.path().to_str().unwrap()).expect("load");

    assert!(records.is_empty());
}

#[test]
fn unreachable_file_is_a_load_failure() {
    let result = read_records("/nonexistent/ev_registrations.csv");
    assert!(result.is_err());
}
