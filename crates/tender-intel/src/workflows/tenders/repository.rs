use super::competitors::CompetitorAnalysis;
use super::domain::{Tender, TenderId, TenderQuery};

/// Storage abstraction over the document store holding tenders and their analyses.
pub trait TenderRepository: Send + Sync {
    fn insert(&self, tender: Tender) -> Result<Tender, RepositoryError>;
    fn fetch(&self, id: &TenderId) -> Result<Option<Tender>, RepositoryError>;
    fn list(&self, query: &TenderQuery) -> Result<Vec<Tender>, RepositoryError>;
    /// Drop every stored tender and load the given catalog in its place.
    fn replace_all(&self, tenders: Vec<Tender>) -> Result<usize, RepositoryError>;
    fn store_analysis(&self, analysis: CompetitorAnalysis) -> Result<(), RepositoryError>;
    fn latest_analysis(
        &self,
        id: &TenderId,
    ) -> Result<Option<CompetitorAnalysis>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
