use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::boq::{BillOfQuantities, BoqItem};
use super::competitors::{CompetitorAnalysis, CompetitorAssessment, CompetitorModel};
use super::domain::{InvalidTender, Tender, TenderId, TenderQuery, TenderRecord, TenderSubmission};
use super::repository::{RepositoryError, TenderRepository};

/// Service composing the tender catalog with the competitor model.
pub struct TenderIntelService<R> {
    repository: Arc<R>,
    model: Arc<CompetitorModel>,
}

static TENDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_tender_id() -> TenderId {
    let id = TENDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TenderId(format!("tnd-{id:06}"))
}

impl<R> TenderIntelService<R>
where
    R: TenderRepository + 'static,
{
    pub fn new(repository: Arc<R>, model: CompetitorModel) -> Self {
        Self {
            repository,
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &CompetitorModel {
        &self.model
    }

    /// Validate and store a new tender under a fresh identifier.
    pub fn register(&self, submission: TenderSubmission) -> Result<Tender, TenderServiceError> {
        submission.validate()?;
        let tender = Tender::from_submission(next_tender_id(), submission);
        let stored = self.repository.insert(tender)?;
        info!(id = %stored.id.0, tender_id = %stored.tender_id, "tender registered");
        Ok(stored)
    }

    pub fn get(&self, id: &TenderId) -> Result<Tender, TenderServiceError> {
        let tender = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(tender)
    }

    pub fn list(&self, query: &TenderQuery) -> Result<Vec<Tender>, TenderServiceError> {
        Ok(self.repository.list(query)?)
    }

    /// Replace the catalog with the supplied submissions.
    pub fn import(
        &self,
        submissions: Vec<TenderSubmission>,
    ) -> Result<usize, TenderServiceError> {
        let mut tenders = Vec::with_capacity(submissions.len());
        for submission in submissions {
            submission.validate()?;
            tenders.push(Tender::from_submission(next_tender_id(), submission));
        }
        let count = self.repository.replace_all(tenders)?;
        info!(count, "tender catalog replaced");
        Ok(count)
    }

    /// Run the competitor model for a stored tender and persist the analysis.
    pub fn analyze_competitors(
        &self,
        id: &TenderId,
    ) -> Result<CompetitorAnalysis, TenderServiceError> {
        let tender = self.get(id)?;
        let analysis = self.model.analyze(tender.id.clone(), &tender.record());
        self.repository.store_analysis(analysis.clone())?;
        info!(
            id = %id.0,
            threat_level = %analysis.threat_level,
            "competitor analysis stored"
        );
        Ok(analysis)
    }

    pub fn latest_analysis(&self, id: &TenderId) -> Result<CompetitorAnalysis, TenderServiceError> {
        let analysis = self
            .repository
            .latest_analysis(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(analysis)
    }

    /// Score a tender record that is not in the catalog.
    pub fn score_record(
        &self,
        record: &TenderRecord,
    ) -> Result<(Vec<CompetitorAssessment>, String), TenderServiceError> {
        record.validate()?;
        let competitors = self.model.predict(record);
        let narrative = super::competitors::narrate(&competitors);
        Ok((competitors, narrative))
    }

    pub fn price_boq(
        &self,
        id: &TenderId,
        items: Vec<BoqItem>,
    ) -> Result<BillOfQuantities, TenderServiceError> {
        let tender = self.get(id)?;
        Ok(BillOfQuantities::price(tender.id, items))
    }
}

/// Error raised by the tender service.
#[derive(Debug, thiserror::Error)]
pub enum TenderServiceError {
    #[error(transparent)]
    InvalidTender(#[from] InvalidTender),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
