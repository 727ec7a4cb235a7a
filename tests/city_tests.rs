use evdash::data::VehicleRecord;
use evdash::stats::{extract_cities, utility_city_counts, OTHER_BUCKET, PUGET_SOUND_BUCKET};
use pretty_assertions::assert_eq;

fn with_utility(utility: &str) -> VehicleRecord {
    VehicleRecord {
        electric_utility: Some(utility.to_string()),
        ..Default::default()
    }
}

#[test]
fn extracts_single_city() {
    assert_eq!(extract_cities("CITY OF SEATTLE - (WA)"), vec!["SEATTLE"]);
}

#[test]
fn extracts_multi_word_city() {
    assert_eq!(
        extract_cities("BONNEVILLE POWER ADMINISTRATION||CITY OF PORT ANGELES - (WA)"),
        vec!["PORT ANGELES"]
    );
}

#[test]
fn extracts_every_embedded_city() {
    let cities = extract_cities("CITY OF SEATTLE - (WA)||CITY OF TACOMA - (WA)");
    assert_eq!(cities, vec!["SEATTLE", "TACOMA"]);
}

#[test]
fn extraction_is_case_sensitive() {
    assert!(extract_cities("City of Seattle - (WA)").is_empty());
}

#[test]
fn counts_fall_back_to_regional_bucket() {
    let counts = utility_city_counts(&[with_utility("PUGET SOUND ENERGY INC")]);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[PUGET_SOUND_BUCKET], 1);
}

#[test]
fn counts_fall_back_to_catch_all_bucket() {
    let counts = utility_city_counts(&[with_utility("PACIFICORP")]);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[OTHER_BUCKET], 1);
}

#[test]
fn embedded_city_beats_regional_fallback() {
    // The regional check only applies when no city pattern matched.
    let counts = utility_city_counts(&[with_utility(
        "PUGET SOUND ENERGY INC||CITY OF TACOMA - (WA)",
    )]);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts["TACOMA"], 1);
}

#[test]
fn one_record_can_count_toward_several_cities() {
    let counts = utility_city_counts(&[with_utility(
        "CITY OF SEATTLE - (WA)||CITY OF TACOMA - (WA)",
    )]);

    assert_eq!(counts["SEATTLE"], 1);
    assert_eq!(counts["TACOMA"], 1);
    assert_eq!(counts.values().sum::<u64>(), 2);
}

#[test]
fn records_without_utility_are_excluded() {
    let records = vec![
        VehicleRecord::default(),
        with_utility("CITY OF SEATTLE - (WA)"),
    ];

    let counts = utility_city_counts(&records);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts["SEATTLE"], 1);
}

#[test]
fn empty_input_yields_empty_counts() {
    assert!(utility_city_counts(&[]).is_empty());
}
