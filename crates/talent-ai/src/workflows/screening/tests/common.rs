//! Shared fixtures and in-memory doubles for the screening tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::screening::domain::{
    ApplicationId, AuditEntry, ExperienceRange, JobRequirements, JobSnapshot, JobType,
    ScoreWeights, WorkflowStage,
};
use crate::workflows::screening::repository::{
    ApplicationRecord, ApplicationRepository, AuditError, AuditLog, RepositoryError,
};
use crate::workflows::screening::service::{ApplicationService, ApplicationSubmission};
use crate::workflows::screening::worker::ScreeningWorker;

pub(super) const STRONG_RESUME: &str = "\
Jordan Mills
Senior Full Stack Developer with 6+ years of experience building cloud services.

Skills: React, Node.js, TypeScript, MongoDB, Docker, Kubernetes, AWS

Experience:
software engineer at cloudline systems (2018-2022)
senior developer at nimbus retail (2022-present)

Education:
Bachelor of Science in Computer Science, State University

Certifications:
AWS Certified Solutions Architect
";

pub(super) const WEAK_RESUME: &str = "\
Casey Flint
Frontend developer with 2 years of experience.

Skills: HTML, CSS, JavaScript

Experience:
junior developer at pixel studio (2023-present)

Education:
Diploma in Web Design
";

pub(super) fn technical_requirements() -> JobRequirements {
    JobRequirements {
        skills: vec![
            "React".to_string(),
            "Node.js".to_string(),
            "MongoDB".to_string(),
            "Docker".to_string(),
            "AWS".to_string(),
        ],
        experience: ExperienceRange {
            min_years: 5,
            max_years: 8,
        },
        education: vec!["Bachelor in Computer Science".to_string()],
        certifications: vec!["AWS Certified".to_string()],
        weights: ScoreWeights::default(),
        passing_score: 75,
    }
}

pub(super) fn technical_job() -> JobSnapshot {
    JobSnapshot {
        title: "Senior Full Stack Developer".to_string(),
        job_type: JobType::Technical,
        requirements: technical_requirements(),
        workflow_stages: WorkflowStage::default_pipeline(),
    }
}

pub(super) fn non_technical_job() -> JobSnapshot {
    JobSnapshot {
        title: "HR Manager".to_string(),
        job_type: JobType::NonTechnical,
        requirements: JobRequirements::default(),
        workflow_stages: WorkflowStage::default_pipeline(),
    }
}

pub(super) fn submission(
    applicant: &str,
    job: JobSnapshot,
    resume_text: &str,
) -> ApplicationSubmission {
    ApplicationSubmission {
        applicant: applicant.to_string(),
        job,
        resume_text: resume_text.to_string(),
    }
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = ApplicationService::new(repository.clone(), audit.clone());
    (service, repository, audit)
}

pub(super) fn build_stack() -> (
    ApplicationService<MemoryRepository, MemoryAudit>,
    ScreeningWorker<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = ApplicationService::new(repository.clone(), audit.clone());
    let worker = ScreeningWorker::new(repository.clone(), audit.clone());
    (service, worker, repository, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.awaits_screening())
            .cloned()
            .collect())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditLog for MemoryAudit {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn timeline(&self, id: &ApplicationId) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self
            .entries
            .lock()
            .expect("audit mutex poisoned")
            .iter()
            .filter(|entry| entry.application_id == *id)
            .cloned()
            .collect())
    }
}

/// Repository that rejects every insert with a conflict.
pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Repository that fails every call, as if the store were offline.
pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Shares a working store's data but refuses every write.
pub(super) struct ReadOnlyRepository {
    pub(super) inner: MemoryRepository,
}

impl ApplicationRepository for ReadOnlyRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store is read-only".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store is read-only".to_string()))
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.find_pending()
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.list()
    }
}

/// Fails the first write only, so a decision write fails but the retry
/// marker write that follows it succeeds.
pub(super) struct FirstWriteFailsRepository {
    inner: MemoryRepository,
    failed_once: AtomicBool,
}

impl FirstWriteFailsRepository {
    pub(super) fn sharing(inner: MemoryRepository) -> Self {
        Self {
            inner,
            failed_once: AtomicBool::new(false),
        }
    }
}

impl ApplicationRepository for FirstWriteFailsRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("write timeout".to_string()));
        }
        self.inner.update(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.find_pending()
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.list()
    }
}

/// Audit sink that refuses every append.
pub(super) struct FailingAudit;

impl AuditLog for FailingAudit {
    fn append(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit sink offline".to_string()))
    }

    fn timeline(&self, _id: &ApplicationId) -> Result<Vec<AuditEntry>, AuditError> {
        Err(AuditError::Unavailable("audit sink offline".to_string()))
    }
}

/// Repository whose pending query parks on a pair of barriers, holding a scan
/// open so a second scan can be attempted concurrently.
pub(super) struct GatedRepository {
    pub(super) entered: Arc<Barrier>,
    pub(super) release: Arc<Barrier>,
}

impl ApplicationRepository for GatedRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Ok(record)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.entered.wait();
        self.release.wait();
        Ok(Vec::new())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("response body reads");
    serde_json::from_slice(&body).expect("response body is json")
}
