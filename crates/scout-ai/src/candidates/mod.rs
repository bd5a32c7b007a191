//! Candidate registry, cohort views, and intake helpers built on the scoring engine.

pub mod cohort;
pub mod documents;
pub mod domain;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use cohort::{
    ByRiskLevel, DropoutAlert, RiskDistribution, SegmentBucket, SegmentSummary, ZoneSummary,
    DEFAULT_AT_RISK_FLOOR,
};
pub use documents::{validate_document, DocumentCheck, DocumentUpload};
pub use domain::{
    CandidateId, CandidateRecord, CandidateRiskReport, EngagementUpdate, NewCandidate,
    OnboardingStatus, RankQuery,
};
pub use repository::{CandidateRepository, RepositoryError};
pub use roster::{RosterError, RosterImporter};
pub use router::candidate_router;
pub use service::{CandidateService, CandidateServiceError};
