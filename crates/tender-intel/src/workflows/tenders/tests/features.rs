use super::common::*;
use serde_json::json;

use crate::workflows::tenders::competitors::{CompetitorModel, FeatureKind};
use crate::workflows::tenders::domain::{TemporalValue, TenderRecord};

#[test]
fn emd_ratio_is_exact_for_reference_tender() {
    let features = CompetitorModel::default().featurize(&scenario_a_record());

    assert_eq!(features.emd_ratio, 0.02);
    assert_eq!(features.estimated_value_log, 6.0);
    assert_eq!(features.category_risk, 0.6);
    assert_eq!(features.location_factor, 0.2);
    assert_eq!(features.deadline_urgency, 0.5);
}

#[test]
fn zero_value_floors_log_and_zeroes_emd_ratio() {
    let record = TenderRecord {
        estimated_value: 0.0,
        emd_amount: 75_000.0,
        ..TenderRecord::default()
    };

    let features = CompetitorModel::default().featurize(&record);

    assert_eq!(features.estimated_value_log, 0.0);
    assert_eq!(features.emd_ratio, 0.0);
}

#[test]
fn sub_unit_values_map_to_zero_log() {
    let record = TenderRecord {
        estimated_value: 0.4,
        emd_amount: 0.2,
        ..TenderRecord::default()
    };

    let features = CompetitorModel::default().featurize(&record);

    assert_eq!(features.estimated_value_log, 0.0);
    assert_eq!(features.emd_ratio, 0.5);
}

#[test]
fn ten_day_window_scores_two_thirds_urgency() {
    let features = CompetitorModel::default().featurize(&record_with_window(10));
    assert!((features.deadline_urgency - 20.0 / 30.0).abs() < 1e-12);
}

#[test]
fn windows_beyond_thirty_days_clamp_to_zero() {
    let model = CompetitorModel::default();
    assert_eq!(model.featurize(&record_with_window(45)).deadline_urgency, 0.0);
    assert_eq!(model.featurize(&record_with_window(30)).deadline_urgency, 0.0);
}

#[test]
fn same_day_and_past_deadlines_floor_at_one_day() {
    let model = CompetitorModel::default();
    let expected = 29.0 / 30.0;

    for days in [0, -5] {
        let urgency = model.featurize(&record_with_window(days)).deadline_urgency;
        assert!(
            (urgency - expected).abs() < 1e-12,
            "window of {days} days produced {urgency}"
        );
    }
}

#[test]
fn unknown_category_and_location_use_fallbacks() {
    let record = TenderRecord {
        category: "Widgets".to_string(),
        location: "Atlantis".to_string(),
        ..scenario_a_record()
    };

    let features = CompetitorModel::default().featurize(&record);

    assert_eq!(features.category_risk, 0.4);
    assert_eq!(features.location_factor, 0.15);
}

#[test]
fn missing_or_non_temporal_dates_keep_default_urgency() {
    let model = CompetitorModel::default();

    let only_deadline = TenderRecord {
        submission_deadline: Some(TemporalValue::from(published_on())),
        ..scenario_a_record()
    };
    assert_eq!(model.featurize(&only_deadline).deadline_urgency, 0.5);

    let garbled = TenderRecord::from_json(json!({
        "published_date": "sometime in march",
        "submission_deadline": true,
    }))
    .expect("record parses");
    assert_eq!(model.featurize(&garbled).deadline_urgency, 0.5);
}

#[test]
fn string_dates_count_as_temporal() {
    let record = TenderRecord::from_json(json!({
        "published_date": "2025-03-01T00:00:00",
        "submission_deadline": "2025-03-11",
    }))
    .expect("record parses");

    let urgency = CompetitorModel::default().featurize(&record).deadline_urgency;
    assert!((urgency - 20.0 / 30.0).abs() < 1e-12);
}

#[test]
fn feature_iteration_covers_every_kind_once() {
    let features = CompetitorModel::default().featurize(&scenario_a_record());
    let kinds: Vec<FeatureKind> = features.iter().map(|(kind, _)| kind).collect();

    assert_eq!(kinds, FeatureKind::ALL.to_vec());
    for kind in FeatureKind::ALL {
        assert_eq!(FeatureKind::from_key(kind.key()), Some(kind));
    }
}
