//! Core domain types for the screening workflow.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an application at intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Job family; only technical roles are screened automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    Technical,
    NonTechnical,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::Technical => "technical",
            JobType::NonTechnical => "non-technical",
        }
    }
}

/// Pipeline status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Reviewed,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// One step of a job's configured hiring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub name: String,
    pub order: u32,
    /// Whether the screening worker may move applications through this stage
    /// without a human in the loop.
    pub automatable: bool,
}

impl WorkflowStage {
    /// Stage list jobs start from when none is configured explicitly.
    pub fn default_pipeline() -> Vec<WorkflowStage> {
        [
            ("applied", 1, false),
            ("screening", 2, true),
            ("reviewed", 3, false),
            ("interview", 4, false),
            ("offer", 5, false),
            ("rejected", 99, false),
        ]
        .into_iter()
        .map(|(name, order, automatable)| WorkflowStage {
            name: name.to_string(),
            order,
            automatable,
        })
        .collect()
    }
}

/// The stage an application currently occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    pub name: String,
    pub order: u32,
    pub entered_at: DateTime<Utc>,
}

impl StageState {
    pub fn from_stage(stage: &WorkflowStage, entered_at: DateTime<Utc>) -> Self {
        Self {
            name: stage.name.clone(),
            order: stage.order,
            entered_at,
        }
    }
}

/// Accepted experience window in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min_years: u32,
    pub max_years: u32,
}

impl ExperienceRange {
    /// The `{0, 20}` window doubles as the "no constraint" sentinel.
    pub const UNCONSTRAINED: ExperienceRange = ExperienceRange {
        min_years: 0,
        max_years: 20,
    };

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::UNCONSTRAINED
    }
}

impl Default for ExperienceRange {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

/// Relative weight, in percent, of each scoring dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills_match: u8,
    pub experience_match: u8,
    pub education_match: u8,
    pub certifications_match: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills_match: 40,
            experience_match: 30,
            education_match: 20,
            certifications_match: 10,
        }
    }
}

/// What a job asks of candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub skills: Vec<String>,
    pub experience: ExperienceRange,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub weights: ScoreWeights,
    pub passing_score: u8,
}

impl Default for JobRequirements {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            experience: ExperienceRange::default(),
            education: Vec::new(),
            certifications: Vec::new(),
            weights: ScoreWeights::default(),
            passing_score: 70,
        }
    }
}

/// Job data captured when the role was published, denormalized onto every
/// application so the worker never needs a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub title: String,
    pub job_type: JobType,
    pub requirements: JobRequirements,
    pub workflow_stages: Vec<WorkflowStage>,
}

impl JobSnapshot {
    /// Stage whose name matches a status in this job's pipeline, if any.
    pub fn stage_for(&self, status: ApplicationStatus) -> Option<&WorkflowStage> {
        self.workflow_stages
            .iter()
            .find(|stage| stage.name.eq_ignore_ascii_case(status.label()))
    }
}

/// One dated engagement pulled from a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Structured data distilled from free-form resume text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: BTreeSet<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub total_experience_years: u32,
}

/// Lifecycle of an application's automated evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationState {
    /// Not yet attempted.
    Pending,
    /// Terminal: a decision was durably recorded.
    Decided,
    /// Attempted and errored; eligible for retry on the next scan.
    Failed,
}

impl EvaluationState {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationState::Pending => "pending",
            EvaluationState::Decided => "decided",
            EvaluationState::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, EvaluationState::Decided)
    }
}

/// Verdict produced by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Passed,
    Rejected,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Passed => "passed",
            Decision::Rejected => "rejected",
        }
    }
}

/// Per-dimension scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
}

impl ScoreBreakdown {
    pub fn values(&self) -> [f64; 4] {
        [
            self.skills,
            self.experience,
            self.education,
            self.certifications,
        ]
    }
}

/// Full outcome of scoring one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub overall_score: u8,
    pub breakdown: ScoreBreakdown,
    pub decision: Decision,
    pub reasoning: String,
    pub confidence: f64,
}

/// Evaluation bookkeeping stored on the application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub state: EvaluationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<EvaluationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Evaluation {
    pub fn pending() -> Self {
        Self {
            state: EvaluationState::Pending,
            processed_at: None,
            outcome: None,
            last_error: None,
        }
    }

    pub fn decided(outcome: EvaluationOutcome, at: DateTime<Utc>) -> Self {
        Self {
            state: EvaluationState::Decided,
            processed_at: Some(at),
            outcome: Some(outcome),
            last_error: None,
        }
    }

    pub fn failed(error: String, at: DateTime<Utc>) -> Self {
        Self {
            state: EvaluationState::Failed,
            processed_at: Some(at),
            outcome: None,
            last_error: Some(error),
        }
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Self::pending()
    }
}

/// Who performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Applicant,
    Admin,
    Bot,
}

impl ActorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ActorKind::Applicant => "applicant",
            ActorKind::Admin => "admin",
            ActorKind::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditActor {
    pub kind: ActorKind,
    pub name: String,
}

impl AuditActor {
    /// Actor identity the evaluation worker signs its entries with.
    pub fn bot() -> Self {
        Self {
            kind: ActorKind::Bot,
            name: "screening-bot".to_string(),
        }
    }

    pub fn applicant(name: &str) -> Self {
        Self {
            kind: ActorKind::Applicant,
            name: name.to_string(),
        }
    }

    pub fn admin(name: &str) -> Self {
        Self {
            kind: ActorKind::Admin,
            name: name.to_string(),
        }
    }
}

/// Actions recorded on the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ApplicationSubmitted,
    ApplicationEvaluated,
    StatusChanged,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            AuditAction::ApplicationSubmitted => "application_submitted",
            AuditAction::ApplicationEvaluated => "application_evaluated",
            AuditAction::StatusChanged => "status_changed",
        }
    }
}

/// Optional context attached to an audit entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Append-only record of one action taken on an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub application_id: ApplicationId,
    pub actor: AuditActor,
    pub action: AuditAction,
    pub details: AuditDetails,
    pub timestamp: DateTime<Utc>,
}
