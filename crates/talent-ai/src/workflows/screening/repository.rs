//! Storage abstractions for applications and the audit trail, plus the
//! persisted application record itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, AuditEntry, CandidateProfile, Evaluation, EvaluationState,
    JobSnapshot, StageState,
};

/// The stored application: the submission plus everything screening attaches
/// to it over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub applicant: String,
    pub job: JobSnapshot,
    pub resume_text: String,
    pub status: ApplicationStatus,
    pub current_stage: StageState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CandidateProfile>,
    pub evaluation: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Whether the periodic scan should still pick this record up. Failed
    /// evaluations stay eligible so transient outages retry on the next scan.
    pub fn awaits_screening(&self) -> bool {
        self.status == ApplicationStatus::Applied && !self.evaluation.state.is_terminal()
    }

    /// One-line explanation of where the evaluation stands.
    pub fn decision_rationale(&self) -> String {
        match self.evaluation.state {
            EvaluationState::Decided => self
                .evaluation
                .outcome
                .as_ref()
                .map(|outcome| outcome.reasoning.clone())
                .unwrap_or_else(|| "decided".to_string()),
            EvaluationState::Failed => match &self.evaluation.last_error {
                Some(error) => format!("evaluation failed, awaiting retry: {error}"),
                None => "evaluation failed, awaiting retry".to_string(),
            },
            EvaluationState::Pending => "pending evaluation".to_string(),
        }
    }

    /// Sanitized view served to API consumers.
    pub fn status_view(&self) -> ApplicationStatusView {
        let outcome = self.evaluation.outcome.as_ref();
        ApplicationStatusView {
            application_id: self.id.clone(),
            status: self.status.label(),
            stage: self.current_stage.name.clone(),
            evaluation_state: self.evaluation.state.label(),
            decision_rationale: self.decision_rationale(),
            overall_score: outcome.map(|outcome| outcome.overall_score),
            decision: outcome.map(|outcome| outcome.decision.label()),
            confidence: outcome.map(|outcome| outcome.confidence),
        }
    }
}

/// Storage backend for application records.
///
/// Implementations must be safe to share across the HTTP handlers and the
/// worker task. `update` replaces the stored record wholesale, which keeps a
/// single-writer store per-record atomic.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Records still awaiting an automated decision: status `applied` with a
    /// pending or failed evaluation.
    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Append-only audit trail.
pub trait AuditLog: Send + Sync {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError>;
    fn timeline(&self, id: &ApplicationId) -> Result<Vec<AuditEntry>, AuditError>;
}

/// Audit trail failures.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}

/// Serialized status summary for one application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub stage: String,
    pub evaluation_state: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
