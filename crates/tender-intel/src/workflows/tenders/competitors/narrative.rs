use serde::{Deserialize, Serialize};

use super::ranking::{CompetitorAssessment, ThreatLevel};

/// Market reading derived from the threat label distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketOutlook {
    HighlyCompetitive,
    LeaderWithChallengers,
    Balanced,
    LowThreat,
}

impl MarketOutlook {
    /// Rules are checked in order; the first match wins.
    pub fn from_assessments(assessments: &[CompetitorAssessment]) -> Self {
        let highs = count(assessments, ThreatLevel::High);
        let mediums = count(assessments, ThreatLevel::Medium);

        if highs >= 2 {
            MarketOutlook::HighlyCompetitive
        } else if highs == 1 && mediums >= 1 {
            MarketOutlook::LeaderWithChallengers
        } else if mediums >= 2 {
            MarketOutlook::Balanced
        } else {
            MarketOutlook::LowThreat
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MarketOutlook::HighlyCompetitive => {
                "Highly competitive market with multiple aggressive players. Consider differentiation and post-warranty support emphasis."
            }
            MarketOutlook::LeaderWithChallengers => {
                "Moderately competitive: one aggressive leader and following challengers. Pricing discipline and value-adds recommended."
            }
            MarketOutlook::Balanced => {
                "Balanced competition. Competitive pricing with quality focus likely to succeed."
            }
            MarketOutlook::LowThreat => {
                "Low immediate threat. Focus on compliance and timely submission to maximize success chances."
            }
        }
    }
}

fn count(assessments: &[CompetitorAssessment], level: ThreatLevel) -> usize {
    assessments
        .iter()
        .filter(|assessment| assessment.threat == level)
        .count()
}

pub fn narrate(assessments: &[CompetitorAssessment]) -> String {
    MarketOutlook::from_assessments(assessments)
        .message()
        .to_string()
}
