use super::config::WeightVector;
use super::features::TenderFeatures;

/// Largest argument for which `f64::exp` stays finite.
const MAX_EXP_ARG: f64 = 709.782_712_893_384;

/// Logistic squashing that saturates instead of overflowing.
///
/// An undefined logit maps to the neutral 0.5.
pub fn sigmoid(z: f64) -> f64 {
    if z.is_nan() {
        return 0.5;
    }
    if -z > MAX_EXP_ARG {
        return 0.0;
    }
    if z > MAX_EXP_ARG {
        return 1.0;
    }
    1.0 / (1.0 + (-z).exp())
}

/// Tender-level threat probability before any competitor adjustment.
///
/// Zero-weighted features contribute nothing, even when their value is infinite.
pub fn score(features: &TenderFeatures, weights: &WeightVector) -> f64 {
    let z = features
        .iter()
        .map(|(kind, value)| (weights.weight(kind), value))
        .filter(|(weight, _)| *weight != 0.0)
        .fold(weights.intercept, |acc, (weight, value)| acc + weight * value);
    sigmoid(z)
}
