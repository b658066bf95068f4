use serde::{Deserialize, Serialize};

use super::super::domain::{TemporalValue, TenderRecord};
use super::config::ModelConfig;

/// Closed set of model inputs derived from a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    EstimatedValueLog,
    EmdRatio,
    CategoryRisk,
    LocationFactor,
    DeadlineUrgency,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::EstimatedValueLog,
        FeatureKind::EmdRatio,
        FeatureKind::CategoryRisk,
        FeatureKind::LocationFactor,
        FeatureKind::DeadlineUrgency,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FeatureKind::EstimatedValueLog => "estimated_value_log",
            FeatureKind::EmdRatio => "emd_ratio",
            FeatureKind::CategoryRisk => "category_risk",
            FeatureKind::LocationFactor => "location_factor",
            FeatureKind::DeadlineUrgency => "deadline_urgency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TenderFeatures {
    pub estimated_value_log: f64,
    pub emd_ratio: f64,
    pub category_risk: f64,
    pub location_factor: f64,
    pub deadline_urgency: f64,
}

impl TenderFeatures {
    pub fn value(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::EstimatedValueLog => self.estimated_value_log,
            FeatureKind::EmdRatio => self.emd_ratio,
            FeatureKind::CategoryRisk => self.category_risk,
            FeatureKind::LocationFactor => self.location_factor,
            FeatureKind::DeadlineUrgency => self.deadline_urgency,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKind, f64)> + '_ {
        FeatureKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.value(kind)))
    }
}

pub(crate) fn featurize(tender: &TenderRecord, config: &ModelConfig) -> TenderFeatures {
    let estimated_value = tender.estimated_value;

    let emd_ratio = if estimated_value > 0.0 {
        tender.emd_amount / estimated_value
    } else {
        0.0
    };

    let deadline_urgency = deadline_urgency(
        tender.published_date.as_ref(),
        tender.submission_deadline.as_ref(),
        config.urgency_window_days,
    )
    .unwrap_or(config.default_urgency);

    TenderFeatures {
        estimated_value_log: estimated_value.max(1.0).log10(),
        emd_ratio,
        category_risk: config.category_risk.get(&tender.category),
        location_factor: config.location_factor.get(&tender.location),
        deadline_urgency,
    }
}

/// Urgency in [0, 1], or `None` when either date is absent or not temporal.
pub(crate) fn deadline_urgency(
    published: Option<&TemporalValue>,
    deadline: Option<&TemporalValue>,
    window_days: f64,
) -> Option<f64> {
    let published = published?.instant()?;
    let deadline = deadline?.instant()?;

    let delta_days = ((deadline - published).num_days() as f64).max(1.0);
    Some(((window_days - delta_days) / window_days).clamp(0.0, 1.0))
}
