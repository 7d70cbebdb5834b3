//! Automated resume screening.
//!
//! Applications enter through [`ApplicationService`], wait in status
//! `applied`, and are picked up by the periodic [`ScreeningWorker`], which
//! parses the resume, scores it against the job's requirements, records a
//! pass/reject decision, and appends the decision to the audit trail.
//! [`application_router`] exposes the workflow over HTTP.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod worker;

pub(crate) mod parser;
pub(crate) mod scoring;
pub(crate) mod similarity;
pub(crate) mod taxonomy;

#[cfg(test)]
mod tests;

pub use domain::{
    ActorKind, ApplicationId, ApplicationStatus, AuditAction, AuditActor, AuditDetails,
    AuditEntry, CandidateProfile, Decision, Evaluation, EvaluationOutcome, EvaluationState,
    ExperienceEntry, ExperienceRange, JobRequirements, JobSnapshot, JobType, ScoreBreakdown,
    ScoreWeights, StageState, WorkflowStage,
};
pub use parser::ResumeParser;
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, AuditError, AuditLog,
    RepositoryError,
};
pub use router::application_router;
pub use scoring::ScoringEngine;
pub use service::{
    ApplicationService, ApplicationServiceError, ApplicationSubmission, PipelineStats,
};
pub use similarity::similarity;
pub use taxonomy::{SkillCategory, SkillEntry, SkillTaxonomy};
pub use worker::{ScanError, ScanOutcome, ScanReport, ScreeningWorker, WorkerStats};
