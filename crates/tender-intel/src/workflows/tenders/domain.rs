use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::competitors::config::{DEFAULT_CATEGORY, DEFAULT_LOCATION};

/// Identifier wrapper for stored tenders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenderId(pub String);

/// Procurement opportunity as stored by the tender catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: TenderId,
    /// Reference number published by the procurement portal.
    pub tender_id: String,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub estimated_value: f64,
    pub emd_amount: f64,
    pub category: String,
    pub location: String,
    pub published_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub status: String,
    pub source: String,
    pub eligibility_criteria: Vec<String>,
    pub technical_specs: BTreeMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl Tender {
    pub fn from_submission(id: TenderId, submission: TenderSubmission) -> Self {
        Self {
            id,
            tender_id: submission.tender_id,
            title: submission.title,
            organization: submission.organization,
            description: submission.description,
            estimated_value: submission.estimated_value,
            emd_amount: submission.emd_amount,
            category: submission.category,
            location: submission.location,
            published_date: submission.published_date,
            submission_deadline: submission.submission_deadline,
            status: submission.status,
            source: submission.source,
            eligibility_criteria: submission.eligibility_criteria,
            technical_specs: submission.technical_specs,
            created_at: Utc::now(),
        }
    }

    /// Scoring view of the stored tender.
    pub fn record(&self) -> TenderRecord {
        TenderRecord {
            estimated_value: self.estimated_value,
            emd_amount: self.emd_amount,
            category: self.category.clone(),
            location: self.location.clone(),
            submission_deadline: Some(TemporalValue::Instant(self.submission_deadline)),
            published_date: Some(TemporalValue::Instant(self.published_date)),
        }
    }
}

/// Payload accepted when registering a tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderSubmission {
    pub tender_id: String,
    pub title: String,
    pub organization: String,
    #[serde(default)]
    pub description: String,
    pub estimated_value: f64,
    pub emd_amount: f64,
    pub category: String,
    pub location: String,
    pub published_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub eligibility_criteria: Vec<String>,
    #[serde(default)]
    pub technical_specs: BTreeMap<String, Value>,
}

impl TenderSubmission {
    pub fn validate(&self) -> Result<(), InvalidTender> {
        if self.tender_id.trim().is_empty() {
            return Err(InvalidTender::MissingField { field: "tender_id" });
        }
        if self.title.trim().is_empty() {
            return Err(InvalidTender::MissingField { field: "title" });
        }
        ensure_finite("estimated_value", self.estimated_value)?;
        ensure_finite("emd_amount", self.emd_amount)
    }
}

fn default_status() -> String {
    "active".to_string()
}

fn default_source() -> String {
    "GeM".to_string()
}

/// Paging and filter parameters for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub category: Option<String>,
}

impl Default for TenderQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            category: None,
        }
    }
}

fn default_limit() -> usize {
    20
}

/// Date-like input as it arrives from the store or an API caller.
///
/// Instants deserialize from RFC 3339 strings; anything else is kept raw and
/// only treated as temporal if it parses as a calendar date or naive timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemporalValue {
    Instant(DateTime<Utc>),
    Raw(Value),
}

impl TemporalValue {
    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            TemporalValue::Instant(at) => Some(at.naive_utc()),
            TemporalValue::Raw(Value::String(raw)) => parse_temporal(raw),
            TemporalValue::Raw(_) => None,
        }
    }
}

impl From<NaiveDate> for TemporalValue {
    fn from(value: NaiveDate) -> Self {
        TemporalValue::Instant(value.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl From<DateTime<Utc>> for TemporalValue {
    fn from(value: DateTime<Utc>) -> Self {
        TemporalValue::Instant(value)
    }
}

fn parse_temporal(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

/// Tender attributes consumed by the competitor model. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderRecord {
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub emd_amount: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub submission_deadline: Option<TemporalValue>,
    #[serde(default)]
    pub published_date: Option<TemporalValue>,
}

impl Default for TenderRecord {
    fn default() -> Self {
        Self {
            estimated_value: 0.0,
            emd_amount: 0.0,
            category: default_category(),
            location: default_location(),
            submission_deadline: None,
            published_date: None,
        }
    }
}

impl TenderRecord {
    /// Decode an untyped record, rejecting values of the wrong shape.
    pub fn from_json(value: Value) -> Result<Self, InvalidTender> {
        let record: TenderRecord = serde_json::from_value(value)?;
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), InvalidTender> {
        ensure_finite("estimated_value", self.estimated_value)?;
        ensure_finite("emd_amount", self.emd_amount)
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), InvalidTender> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidTender::NonFinite { field })
    }
}

/// Upstream contract violation on a tender payload.
#[derive(Debug, thiserror::Error)]
pub enum InvalidTender {
    #[error("malformed tender record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("invalid request body: {0}")]
    Body(String),
}

/// Round half-to-even at the given number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_defaults_apply_to_missing_fields() {
        let record = TenderRecord::from_json(json!({})).expect("empty record is valid");
        assert_eq!(record, TenderRecord::default());
        assert_eq!(record.category, "IT Services");
        assert_eq!(record.location, "New Delhi");
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = TenderRecord::from_json(json!({ "estimated_value": "ten lakh" }))
            .expect_err("string value rejected");
        assert!(matches!(err, InvalidTender::Malformed(_)));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let record = TenderRecord {
            emd_amount: f64::NAN,
            ..TenderRecord::default()
        };
        assert!(matches!(
            record.validate(),
            Err(InvalidTender::NonFinite {
                field: "emd_amount"
            })
        ));
    }

    #[test]
    fn temporal_values_accept_dates_and_timestamps() {
        let record = TenderRecord::from_json(json!({
            "published_date": "2025-03-01",
            "submission_deadline": "2025-03-11T17:30:00Z",
        }))
        .expect("record parses");

        let published = record.published_date.and_then(|value| value.instant());
        let deadline = record.submission_deadline.and_then(|value| value.instant());
        assert_eq!(
            published,
            NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(
            deadline,
            NaiveDate::from_ymd_opt(2025, 3, 11).and_then(|d| d.and_hms_opt(17, 30, 0))
        );
    }

    #[test]
    fn non_temporal_values_are_kept_raw() {
        let record = TenderRecord::from_json(json!({
            "published_date": 20250301,
            "submission_deadline": "next tuesday",
        }))
        .expect("record parses");

        assert!(record.published_date.expect("present").instant().is_none());
        assert!(record.submission_deadline.expect("present").instant().is_none());
    }

    #[test]
    fn rounding_breaks_ties_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(12.5, 1), 12.5);
        assert_eq!(round_to(0.7139, 3), 0.714);
    }
}
