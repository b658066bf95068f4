//! Tender catalog, bill-of-quantities pricing, and competitor-threat analytics.

pub mod boq;
pub mod catalog;
pub mod competitors;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use boq::{BillOfQuantities, BoqItem, GST_RATE};
pub use catalog::sample_catalog;
pub use competitors::{
    CompetitorAnalysis, CompetitorAssessment, CompetitorModel, CompetitorProfile, MarketOutlook,
    ModelConfig, TenderFeatures, ThreatLevel, WeightVector,
};
pub use domain::{
    InvalidTender, TemporalValue, Tender, TenderId, TenderQuery, TenderRecord, TenderSubmission,
};
pub use repository::{RepositoryError, TenderRepository};
pub use router::tender_router;
pub use service::{TenderIntelService, TenderServiceError};
