use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::features::FeatureKind;

pub(crate) const DEFAULT_CATEGORY: &str = "IT Services";
pub(crate) const DEFAULT_LOCATION: &str = "New Delhi";

/// Logistic coefficients applied to the tender feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub intercept: f64,
    pub estimated_value_log: f64,
    pub emd_ratio: f64,
    pub category_risk: f64,
    pub location_factor: f64,
    pub deadline_urgency: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            intercept: -0.5,
            estimated_value_log: 0.35,
            emd_ratio: -0.25,
            category_risk: 0.6,
            location_factor: 0.15,
            deadline_urgency: 0.4,
        }
    }
}

impl WeightVector {
    /// Merge named overrides over the current coefficients. Unknown keys are skipped.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        for (key, value) in overrides {
            if key == "intercept" {
                self.intercept = *value;
                continue;
            }
            match FeatureKind::from_key(key) {
                Some(kind) => *self.slot_mut(kind) = *value,
                None => tracing::debug!(key = %key, "ignoring unknown weight override"),
            }
        }
        self
    }

    pub fn weight(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::EstimatedValueLog => self.estimated_value_log,
            FeatureKind::EmdRatio => self.emd_ratio,
            FeatureKind::CategoryRisk => self.category_risk,
            FeatureKind::LocationFactor => self.location_factor,
            FeatureKind::DeadlineUrgency => self.deadline_urgency,
        }
    }

    fn slot_mut(&mut self, kind: FeatureKind) -> &mut f64 {
        match kind {
            FeatureKind::EstimatedValueLog => &mut self.estimated_value_log,
            FeatureKind::EmdRatio => &mut self.emd_ratio,
            FeatureKind::CategoryRisk => &mut self.category_risk,
            FeatureKind::LocationFactor => &mut self.location_factor,
            FeatureKind::DeadlineUrgency => &mut self.deadline_urgency,
        }
    }
}

/// Static bidding profile for a known competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    #[serde(default = "default_competitor_name")]
    pub name: String,
    #[serde(default = "default_win_rate")]
    pub base_win_rate: f64,
    #[serde(default = "default_margin")]
    pub avg_margin: f64,
}

impl CompetitorProfile {
    pub fn new(name: impl Into<String>, base_win_rate: f64, avg_margin: f64) -> Self {
        Self {
            name: name.into(),
            base_win_rate,
            avg_margin,
        }
    }
}

fn default_competitor_name() -> String {
    "Unknown".to_string()
}

fn default_win_rate() -> f64 {
    0.5
}

fn default_margin() -> f64 {
    0.15
}

pub fn default_roster() -> Vec<CompetitorProfile> {
    vec![
        CompetitorProfile::new("TechCorp Solutions", 0.65, 0.125),
        CompetitorProfile::new("Global Vendors Ltd", 0.55, 0.15),
        CompetitorProfile::new("Prime Suppliers", 0.45, 0.18),
    ]
}

/// Named coefficient table with a fallback for unlisted keys.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    entries: BTreeMap<String, f64>,
    fallback: f64,
}

impl LookupTable {
    pub fn new<I, K>(entries: I, fallback: f64) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
            fallback,
        }
    }

    pub fn get(&self, key: &str) -> f64 {
        self.entries.get(key).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }
}

pub fn default_category_risk() -> LookupTable {
    LookupTable::new(
        [
            ("IT Services", 0.6),
            ("Construction", 0.8),
            ("Medical Equipment", 0.5),
            ("Office Supplies", 0.3),
            ("Consulting", 0.4),
        ],
        0.4,
    )
}

pub fn default_location_factor() -> LookupTable {
    LookupTable::new(
        [
            ("New Delhi", 0.2),
            ("Mumbai", 0.25),
            ("Bangalore", 0.22),
            ("Chennai", 0.18),
            ("Kolkata", 0.15),
            ("Hyderabad", 0.2),
        ],
        0.15,
    )
}

/// Immutable tables driving the competitor model. Built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub weights: WeightVector,
    pub competitors: Vec<CompetitorProfile>,
    pub category_risk: LookupTable,
    pub location_factor: LookupTable,
    /// Days before the deadline at which urgency starts rising above zero.
    pub urgency_window_days: f64,
    pub default_urgency: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            competitors: default_roster(),
            category_risk: default_category_risk(),
            location_factor: default_location_factor(),
            urgency_window_days: 30.0,
            default_urgency: 0.5,
        }
    }
}

impl ModelConfig {
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_competitors(mut self, competitors: Vec<CompetitorProfile>) -> Self {
        self.competitors = competitors;
        self
    }
}
