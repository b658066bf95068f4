use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tender_intel::workflows::tenders::{
    CompetitorAnalysis, RepositoryError, Tender, TenderId, TenderQuery, TenderRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local tender store. Listing order follows insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTenderRepository {
    tenders: Arc<Mutex<Vec<Tender>>>,
    analyses: Arc<Mutex<HashMap<TenderId, Vec<CompetitorAnalysis>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

impl TenderRepository for InMemoryTenderRepository {
    fn insert(&self, tender: Tender) -> Result<Tender, RepositoryError> {
        let mut guard = lock(&self.tenders)?;
        if guard
            .iter()
            .any(|stored| stored.id == tender.id || stored.tender_id == tender.tender_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(tender.clone());
        Ok(tender)
    }

    fn fetch(&self, id: &TenderId) -> Result<Option<Tender>, RepositoryError> {
        let guard = lock(&self.tenders)?;
        Ok(guard.iter().find(|tender| &tender.id == id).cloned())
    }

    fn list(&self, query: &TenderQuery) -> Result<Vec<Tender>, RepositoryError> {
        let guard = lock(&self.tenders)?;
        Ok(guard
            .iter()
            .filter(|tender| match &query.category {
                Some(category) => &tender.category == category,
                None => true,
            })
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn replace_all(&self, tenders: Vec<Tender>) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.tenders)?;
        *guard = tenders;
        lock(&self.analyses)?.clear();
        Ok(guard.len())
    }

    fn store_analysis(&self, analysis: CompetitorAnalysis) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.analyses)?;
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
        let guard = lock(&self.analyses)?;
        Ok(guard.get(id).and_then(|history| history.last().cloned()))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
