//! Intake and review-desk operations around the repository and audit trail.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, AuditAction, AuditActor, AuditDetails, AuditEntry, Decision,
    Evaluation, EvaluationState, JobSnapshot, StageState,
};
use super::repository::{
    ApplicationRecord, ApplicationRepository, AuditError, AuditLog, RepositoryError,
};

/// Applicant-provided payload for a new application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub applicant: String,
    pub job: JobSnapshot,
    pub resume_text: String,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Front door of the workflow: accepts applications, serves status and
/// timeline queries, and applies manual review decisions.
pub struct ApplicationService<R, L> {
    repository: Arc<R>,
    audit: Arc<L>,
}

impl<R, L> ApplicationService<R, L>
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self { repository, audit }
    }

    /// Accept a new application. The record starts in status `applied` with a
    /// pending evaluation; the periodic worker picks it up from there.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let now = Utc::now();
        let id = next_application_id();
        let applicant = submission.applicant;

        let current_stage = submission
            .job
            .stage_for(ApplicationStatus::Applied)
            .map(|stage| StageState::from_stage(stage, now))
            .unwrap_or_else(|| StageState {
                name: ApplicationStatus::Applied.label().to_string(),
                order: 1,
                entered_at: now,
            });

        let record = ApplicationRecord {
            id: id.clone(),
            applicant: applicant.clone(),
            job: submission.job,
            resume_text: submission.resume_text,
            status: ApplicationStatus::Applied,
            current_stage,
            profile: None,
            evaluation: Evaluation::pending(),
            rejection_reason: None,
            submitted_at: now,
        };

        let stored = self.repository.insert(record)?;

        self.audit.append(AuditEntry {
            application_id: id,
            actor: AuditActor::applicant(&applicant),
            action: AuditAction::ApplicationSubmitted,
            details: AuditDetails {
                to_status: Some(ApplicationStatus::Applied),
                ..AuditDetails::default()
            },
            timestamp: now,
        })?;

        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Audit trail for one application, oldest entry first.
    pub fn timeline(&self, id: &ApplicationId) -> Result<Vec<AuditEntry>, ApplicationServiceError> {
        let mut entries = self.audit.timeline(id)?;
        entries.sort_by_key(|entry| entry.timestamp);
        Ok(entries)
    }

    /// Manual status override from the review desk. The stage follows the
    /// status when the job's pipeline has a matching stage.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        new_status: ApplicationStatus,
        reviewer: &str,
        comment: Option<String>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let now = Utc::now();
        let old_status = record.status;

        record.status = new_status;
        if let Some(stage) = record.job.stage_for(new_status) {
            record.current_stage = StageState::from_stage(stage, now);
        }
        if new_status == ApplicationStatus::Rejected {
            record.rejection_reason = Some(
                comment
                    .clone()
                    .unwrap_or_else(|| "rejected by reviewer".to_string()),
            );
        }

        self.repository.update(record.clone())?;

        self.audit.append(AuditEntry {
            application_id: id.clone(),
            actor: AuditActor::admin(reviewer),
            action: AuditAction::StatusChanged,
            details: AuditDetails {
                from_status: Some(old_status),
                to_status: Some(new_status),
                comment,
                ..AuditDetails::default()
            },
            timestamp: now,
        })?;

        Ok(record)
    }

    /// Aggregated pipeline counters for dashboards.
    pub fn pipeline_stats(&self) -> Result<PipelineStats, ApplicationServiceError> {
        let records = self.repository.list()?;

        let mut stats = PipelineStats {
            total: records.len(),
            ..PipelineStats::default()
        };
        let mut score_sum: u64 = 0;
        let mut score_count: u64 = 0;

        for record in &records {
            *stats
                .by_status
                .entry(record.status.label().to_string())
                .or_insert(0) += 1;
            if record.awaits_screening() {
                stats.awaiting_screening += 1;
            }
            match record.evaluation.state {
                EvaluationState::Decided => {
                    stats.decided += 1;
                    if let Some(outcome) = &record.evaluation.outcome {
                        score_sum += u64::from(outcome.overall_score);
                        score_count += 1;
                        match outcome.decision {
                            Decision::Passed => stats.passed += 1,
                            Decision::Rejected => stats.rejected_by_screening += 1,
                        }
                    }
                }
                EvaluationState::Failed => stats.failed += 1,
                EvaluationState::Pending => {}
            }
        }

        if score_count > 0 {
            stats.average_score = Some(score_sum as f64 / score_count as f64);
        }

        Ok(stats)
    }
}

/// Counters summarizing where applications sit in the pipeline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub awaiting_screening: usize,
    pub decided: usize,
    pub passed: usize,
    pub rejected_by_screening: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}

/// Errors raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
