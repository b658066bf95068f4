//! Heuristic competitor-threat model.
//!
//! A tender is reduced to a fixed feature vector, squashed through a logistic
//! score, then spread across the competitor roster and summarized as a market
//! reading. Every stage is pure; configuration is fixed at construction.

pub mod config;
mod features;
mod loader;
mod narrative;
mod ranking;
mod scoring;

pub use config::{CompetitorProfile, LookupTable, ModelConfig, WeightVector};
pub use features::{FeatureKind, TenderFeatures};
pub use loader::{read_roster, read_weight_overrides, ModelSourceError};
pub use narrative::{narrate, MarketOutlook};
pub use ranking::{
    rank, CompetitorAssessment, ThreatLevel, HIGH_THREAT_THRESHOLD, MEDIUM_THREAT_THRESHOLD,
};
pub use scoring::{score, sigmoid};

use serde::{Deserialize, Serialize};

use super::domain::{TenderId, TenderRecord};

const COMPETITIVE_ADVANTAGE: [&str; 3] = [
    "Focus on quality and service",
    "Competitive pricing with 13-16% margin",
    "Strong technical capabilities",
];

/// Stateless scorer bound to one immutable configuration.
#[derive(Debug, Clone)]
pub struct CompetitorModel {
    config: ModelConfig,
}

impl Default for CompetitorModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl CompetitorModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn featurize(&self, tender: &TenderRecord) -> TenderFeatures {
        features::featurize(tender, &self.config)
    }

    pub fn base_score(&self, tender: &TenderRecord) -> f64 {
        score(&self.featurize(tender), &self.config.weights)
    }

    pub fn predict(&self, tender: &TenderRecord) -> Vec<CompetitorAssessment> {
        rank(self.base_score(tender), &self.config.competitors)
    }

    pub fn analyze(&self, tender_id: TenderId, tender: &TenderRecord) -> CompetitorAnalysis {
        let competitors = self.predict(tender);
        let outlook = MarketOutlook::from_assessments(&competitors);
        let threat_level = ThreatLevel::highest(&competitors);

        tracing::debug!(
            tender_id = %tender_id.0,
            competitors = competitors.len(),
            threat_level = threat_level.label(),
            "competitor analysis computed"
        );

        CompetitorAnalysis {
            tender_id,
            competitors,
            market_analysis: outlook.message().to_string(),
            outlook,
            competitive_advantage: COMPETITIVE_ADVANTAGE
                .iter()
                .map(|item| item.to_string())
                .collect(),
            threat_level: threat_level.label().to_string(),
        }
    }
}

/// Competitor report returned to bid managers and persisted per tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorAnalysis {
    pub tender_id: TenderId,
    pub competitors: Vec<CompetitorAssessment>,
    pub market_analysis: String,
    pub outlook: MarketOutlook,
    pub competitive_advantage: Vec<String>,
    /// Highest threat label across the roster.
    pub threat_level: String,
}
