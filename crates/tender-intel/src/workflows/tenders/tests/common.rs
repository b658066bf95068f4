use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;

use crate::workflows::tenders::competitors::{CompetitorAnalysis, CompetitorModel};
use crate::workflows::tenders::domain::{
    TemporalValue, Tender, TenderId, TenderQuery, TenderRecord, TenderSubmission,
};
use crate::workflows::tenders::repository::{RepositoryError, TenderRepository};
use crate::workflows::tenders::{tender_router, CompetitorAssessment, TenderIntelService, ThreatLevel};

pub(super) fn published_on() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) fn scenario_a_record() -> TenderRecord {
    TenderRecord {
        estimated_value: 1_000_000.0,
        emd_amount: 20_000.0,
        category: "IT Services".to_string(),
        location: "New Delhi".to_string(),
        submission_deadline: None,
        published_date: None,
    }
}

pub(super) fn record_with_window(days: i64) -> TenderRecord {
    let published = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    TenderRecord {
        published_date: Some(TemporalValue::from(published)),
        submission_deadline: Some(TemporalValue::from(published + Duration::days(days))),
        ..scenario_a_record()
    }
}

pub(super) fn submission() -> TenderSubmission {
    let published_date = published_on();
    let mut technical_specs = BTreeMap::new();
    technical_specs.insert("warranty".to_string(), Value::String("3 years".to_string()));

    TenderSubmission {
        tender_id: "GEM/2025/B/5123456".to_string(),
        title: "Supply of Network Switches".to_string(),
        organization: "Railways".to_string(),
        description: "Layer-3 switches for divisional offices.".to_string(),
        estimated_value: 1_000_000.0,
        emd_amount: 20_000.0,
        category: "IT Services".to_string(),
        location: "New Delhi".to_string(),
        published_date,
        submission_deadline: published_date + Duration::days(10),
        status: "active".to_string(),
        source: "GeM".to_string(),
        eligibility_criteria: vec!["Registered company with GST".to_string()],
        technical_specs,
    }
}

pub(super) fn assessment(name: &str, threat: ThreatLevel) -> CompetitorAssessment {
    CompetitorAssessment {
        name: name.to_string(),
        win_rate_pct: 50.0,
        avg_margin_pct: 15.0,
        threat,
        threat_score: match threat {
            ThreatLevel::High => 0.7,
            ThreatLevel::Medium => 0.5,
            ThreatLevel::Low => 0.2,
        },
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    tenders: Arc<Mutex<Vec<Tender>>>,
    analyses: Arc<Mutex<HashMap<TenderId, Vec<CompetitorAnalysis>>>>,
}

impl MemoryRepository {
    pub(super) fn analysis_count(&self, id: &TenderId) -> usize {
        self.analyses
            .lock()
            .expect("analysis mutex poisoned")
            .get(id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl TenderRepository for MemoryRepository {
    fn insert(&self, tender: Tender) -> Result<Tender, RepositoryError> {
        let mut guard = self.tenders.lock().expect("tender mutex poisoned");
        if guard.iter().any(|stored| stored.id == tender.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(tender.clone());
        Ok(tender)
    }

    fn fetch(&self, id: &TenderId) -> Result<Option<Tender>, RepositoryError> {
        let guard = self.tenders.lock().expect("tender mutex poisoned");
        Ok(guard.iter().find(|tender| &tender.id == id).cloned())
    }

    fn list(&self, query: &TenderQuery) -> Result<Vec<Tender>, RepositoryError> {
        let guard = self.tenders.lock().expect("tender mutex poisoned");
        Ok(guard
            .iter()
            .filter(|tender| {
                query
                    .category
                    .as_ref()
                    .map(|category| &tender.category == category)
                    .unwrap_or(true)
            })
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn replace_all(&self, tenders: Vec<Tender>) -> Result<usize, RepositoryError> {
        let mut guard = self.tenders.lock().expect("tender mutex poisoned");
        *guard = tenders;
        Ok(guard.len())
    }

    fn store_analysis(&self, analysis: CompetitorAnalysis) -> Result<(), RepositoryError> {
        let mut guard = self.analyses.lock().expect("analysis mutex poisoned");
        guard
            .entry(analysis.tender_id.clone())
            .or_default()
            .push(analysis);
        Ok(())
    }

    fn latest_analysis(
        &self,
        id: &TenderId,
    ) -> Result<Option<CompetitorAnalysis>, RepositoryError> {
        let guard = self.analyses.lock().expect("analysis mutex poisoned");
        Ok(guard.get(id).and_then(|history| history.last().cloned()))
    }
}

pub(super) struct UnavailableRepository;

impl TenderRepository for UnavailableRepository {
    fn insert(&self, _tender: Tender) -> Result<Tender, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn fetch(&self, _id: &TenderId) -> Result<Option<Tender>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn list(&self, _query: &TenderQuery) -> Result<Vec<Tender>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn replace_all(&self, _tenders: Vec<Tender>) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn store_analysis(&self, _analysis: CompetitorAnalysis) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn latest_analysis(
        &self,
        _id: &TenderId,
    ) -> Result<Option<CompetitorAnalysis>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) fn build_service() -> (TenderIntelService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = TenderIntelService::new(Arc::new(repository.clone()), CompetitorModel::default());
    (service, repository)
}

pub(super) fn router_with_service(service: TenderIntelService<MemoryRepository>) -> axum::Router {
    tender_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
