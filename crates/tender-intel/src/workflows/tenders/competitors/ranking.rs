use serde::{Deserialize, Serialize};

use super::super::domain::round_to;
use super::config::CompetitorProfile;

pub const HIGH_THREAT_THRESHOLD: f64 = 0.66;
pub const MEDIUM_THREAT_THRESHOLD: f64 = 0.40;

/// Margins beyond this cap add no further pricing pressure.
const MARGIN_CAP: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Bands are inclusive at their lower bound.
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_THREAT_THRESHOLD {
            ThreatLevel::High
        } else if score >= MEDIUM_THREAT_THRESHOLD {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }

    /// Most severe level across the rows, `Low` when there are none.
    pub fn highest(assessments: &[CompetitorAssessment]) -> Self {
        assessments
            .iter()
            .map(|assessment| assessment.threat)
            .max()
            .unwrap_or(ThreatLevel::Low)
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
        }
    }
}

/// Per-competitor threat row. Percentages are presentation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorAssessment {
    pub name: String,
    #[serde(rename = "win_rate")]
    pub win_rate_pct: f64,
    #[serde(rename = "avg_margin")]
    pub avg_margin_pct: f64,
    pub threat: ThreatLevel,
    pub threat_score: f64,
}

pub(crate) fn pricing_factor(avg_margin: f64) -> f64 {
    1.0 - avg_margin.clamp(0.0, MARGIN_CAP)
}

pub(crate) fn competitor_score(base_score: f64, profile: &CompetitorProfile) -> f64 {
    let pricing = pricing_factor(profile.avg_margin);
    let score = base_score * (0.5 + 0.5 * profile.base_win_rate) * (0.7 + 0.3 * pricing);
    score.clamp(0.0, 1.0)
}

/// One assessment per competitor, in roster order.
pub fn rank(base_score: f64, competitors: &[CompetitorProfile]) -> Vec<CompetitorAssessment> {
    competitors
        .iter()
        .map(|profile| {
            let score = competitor_score(base_score, profile);
            CompetitorAssessment {
                name: profile.name.clone(),
                win_rate_pct: round_to(profile.base_win_rate * 100.0, 1),
                avg_margin_pct: round_to(profile.avg_margin * 100.0, 1),
                threat: ThreatLevel::classify(score),
                threat_score: round_to(score, 3),
            }
        })
        .collect()
}
