mod common;

use common::{sample_csv, write_csv};
use opportunity_mapper::api::Session;
use opportunity_mapper::config::{ScoringConfig, WeightVector};
use opportunity_mapper::error::MapperError;

fn crime_only() -> ScoringConfig {
    ScoringConfig::with_weights(WeightVector::from_pairs([("crime_rate", 1.0)]).unwrap())
}

fn zips(session: &Session) -> Vec<String> {
    session
        .ranking()
        .iter()
        .map(|s| s.zip_code.clone())
        .collect()
}

#[test]
fn test_session_ranks_on_open() {
    let file = write_csv(&sample_csv());
    let session = Session::open(file.path(), crime_only()).unwrap();

    // Crime 10 < 20 < 30 < 40.
    assert_eq!(zips(&session), vec!["94101", "94103", "94102", "94104"]);
    assert_eq!(session.top(2).len(), 2);
    assert_eq!(session.top(99).len(), 4);

    let best = &session.ranking()[0];
    assert_eq!(session.record(best).place_name.as_deref(), Some("Alpha"));
}

#[test]
fn test_invalid_weights_keep_previous_ranking() {
    let file = write_csv(&sample_csv());
    let mut session = Session::open(file.path(), crime_only()).unwrap();
    let before = zips(&session);

    let err = session
        .rescore(ScoringConfig::with_weights(WeightVector::zeroed()))
        .unwrap_err();
    assert!(matches!(err, MapperError::InvalidWeights(_)));
    assert_eq!(zips(&session), before);
    assert_eq!(session.config(), &crime_only());
}

#[test]
fn test_rescore_replaces_ranking() {
    let file = write_csv(&sample_csv());
    let mut session = Session::open(file.path(), crime_only()).unwrap();

    let income = WeightVector::from_pairs([("income", 1.0)]).unwrap();
    let ranked = session.rescore(ScoringConfig::with_weights(income)).unwrap();
    assert_eq!(ranked[0].zip_code, "94103");
    assert_eq!(zips(&session), vec!["94103", "94101", "94104", "94102"]);
}

#[test]
fn test_invalid_initial_config_fails() {
    let file = write_csv(&sample_csv());
    let result = Session::open(file.path(), ScoringConfig::with_weights(WeightVector::zeroed()));
    assert!(matches!(result, Err(MapperError::InvalidWeights(_))));
}

#[test]
fn test_map_entries_carry_geometry_and_rank() {
    let file = write_csv(&sample_csv());
    let mut config = crime_only();
    config.max_rent = Some(2600.0);
    let session = Session::open(file.path(), config).unwrap();

    let entries = session.map_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].zip_code, "94101");
    assert_eq!(entries[0].geometry, "g/94101");
    assert_eq!(entries[0].rent, Some(2000.0));
    assert_eq!(entries[0].percent, 100.0);
    assert_eq!(entries[1].zip_code, "94104");
    assert_eq!(entries[1].percent, 0.0);

    let json = serde_json::to_string(&entries).unwrap();
    assert!(json.contains("\"zipCode\":\"94101\""));
}
