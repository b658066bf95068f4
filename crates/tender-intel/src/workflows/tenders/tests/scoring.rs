use super::common::*;

use crate::workflows::tenders::competitors::{
    score, sigmoid, CompetitorModel, ModelConfig, TenderFeatures, WeightVector,
};

fn unit_features() -> TenderFeatures {
    TenderFeatures {
        estimated_value_log: 1.0,
        emd_ratio: 1.0,
        category_risk: 1.0,
        location_factor: 1.0,
        deadline_urgency: 1.0,
    }
}

#[test]
fn reference_tender_base_score_matches_logistic_combination() {
    let model = CompetitorModel::default();
    let base = model.base_score(&scenario_a_record());

    // -0.5 + 0.35*6 - 0.25*0.02 + 0.6*0.6 + 0.15*0.2 + 0.4*0.5 = 2.185
    let expected = 1.0 / (1.0 + (-2.185f64).exp());
    assert!((base - expected).abs() < 1e-12);
    assert!((base - 0.898_894_395_589_545_4).abs() < 1e-9);
}

#[test]
fn sigmoid_is_centered_and_symmetric() {
    assert_eq!(sigmoid(0.0), 0.5);
    assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
}

#[test]
fn sigmoid_saturates_instead_of_overflowing() {
    assert_eq!(sigmoid(-1_000.0), 0.0);
    assert_eq!(sigmoid(1_000.0), 1.0);
    assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
    assert_eq!(sigmoid(f64::INFINITY), 1.0);
}

#[test]
fn extreme_weights_stay_within_unit_interval() {
    let huge = WeightVector {
        intercept: 5.0e307,
        estimated_value_log: 5.0e307,
        emd_ratio: 0.0,
        category_risk: 0.0,
        location_factor: 0.0,
        deadline_urgency: 0.0,
    };
    assert_eq!(score(&unit_features(), &huge), 1.0);

    let negative = WeightVector {
        intercept: -5.0e307,
        estimated_value_log: -5.0e307,
        ..huge
    };
    assert_eq!(score(&unit_features(), &negative), 0.0);
}

#[test]
fn intercept_only_weights_ignore_features() {
    let weights = WeightVector {
        intercept: 0.0,
        estimated_value_log: 0.0,
        emd_ratio: 0.0,
        category_risk: 0.0,
        location_factor: 0.0,
        deadline_urgency: 0.0,
    };
    let model = CompetitorModel::new(ModelConfig::default().with_weights(weights));

    assert_eq!(model.base_score(&scenario_a_record()), 0.5);
}

#[test]
fn scores_are_bounded_for_varied_tenders() {
    let model = CompetitorModel::default();
    for days in [-10, 0, 1, 10, 29, 45, 365] {
        let base = model.base_score(&record_with_window(days));
        assert!((0.0..=1.0).contains(&base), "score {base} out of range");
    }
}

#[test]
fn zero_weight_ignores_unbounded_emd_ratio() {
    let mut record = scenario_a_record();
    record.estimated_value = 1e-300;
    record.emd_amount = 1e10;

    let config = ModelConfig::default().with_weights(WeightVector {
        emd_ratio: 0.0,
        ..WeightVector::default()
    });
    let model = CompetitorModel::new(config);

    assert!(model.featurize(&record).emd_ratio.is_infinite());
    let base = model.base_score(&record);
    assert!((0.0..=1.0).contains(&base));
    assert!(model
        .predict(&record)
        .iter()
        .all(|row| (0.0..=1.0).contains(&row.threat_score)));
}

#[test]
fn undefined_logit_scores_neutral() {
    assert_eq!(sigmoid(f64::NAN), 0.5);

    let conflicting = WeightVector {
        intercept: f64::INFINITY,
        estimated_value_log: f64::NEG_INFINITY,
        ..WeightVector::default()
    };
    assert_eq!(score(&unit_features(), &conflicting), 0.5);
}
