//! Periodic evaluation worker.
//!
//! The worker scans for applications awaiting screening, runs each through
//! the parser and scoring engine, persists the decision, and appends it to
//! the audit trail. A single atomic guard ensures scans never overlap:
//! triggers that arrive while a scan is running are dropped, not queued.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::domain::{
    ApplicationStatus, AuditAction, AuditActor, AuditDetails, AuditEntry, Decision, Evaluation,
    JobType, StageState,
};
use super::parser::ResumeParser;
use super::repository::{
    ApplicationRecord, ApplicationRepository, AuditError, AuditLog, RepositoryError,
};
use super::scoring::ScoringEngine;

/// Evaluates pending applications on a fixed cadence.
pub struct ScreeningWorker<R, L> {
    repository: Arc<R>,
    audit: Arc<L>,
    parser: ResumeParser,
    engine: ScoringEngine,
    in_flight: AtomicBool,
    processed_total: AtomicU64,
}

/// Result of one guarded scan attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed(ScanReport),
    /// Another scan held the guard; nothing was read or written.
    AlreadyRunning,
}

/// Counters for a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Records returned by the pending query.
    pub discovered: usize,
    /// Decisions durably recorded during this scan.
    pub evaluated: usize,
    pub passed: usize,
    pub rejected: usize,
    /// Non-technical roles left for manual review.
    pub skipped_manual: usize,
    /// Items that hit a store or audit failure.
    pub errors: usize,
}

/// Scan-level failure: the pending query itself could not run. Per-item
/// failures never surface here; they are counted in the report instead.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("pending application query failed: {0}")]
    Discovery(#[from] RepositoryError),
}

/// Live worker counters, exposed on the operations endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorkerStats {
    pub processed_total: u64,
    pub scan_in_flight: bool,
}

/// Releases the scan guard on every exit path, early returns included.
struct ScanPermit<'a>(&'a AtomicBool);

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

enum ItemError {
    /// The decision could not be persisted; the record stays eligible for a
    /// retry on the next scan.
    Persist(RepositoryError),
    /// The decision is durable but its audit entry was not recorded.
    Audit {
        decision: Decision,
        source: AuditError,
    },
}

impl<R, L> ScreeningWorker<R, L>
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self {
            repository,
            audit,
            parser: ResumeParser::new(),
            engine: ScoringEngine::new(),
            in_flight: AtomicBool::new(false),
            processed_total: AtomicU64::new(0),
        }
    }

    /// Run one guarded scan. Returns [`ScanOutcome::AlreadyRunning`] without
    /// touching the store when another scan holds the guard. A failure of the
    /// pending query aborts the whole scan; failures on individual records
    /// are absorbed so one bad application cannot stall the rest.
    pub fn run_once(&self) -> Result<ScanOutcome, ScanError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(ScanOutcome::AlreadyRunning);
        }
        let _permit = ScanPermit(&self.in_flight);

        let pending = self.repository.find_pending()?;
        let mut report = ScanReport {
            discovered: pending.len(),
            ..ScanReport::default()
        };

        if pending.is_empty() {
            return Ok(ScanOutcome::Completed(report));
        }

        info!(count = pending.len(), "found applications awaiting screening");

        for record in pending {
            if record.job.job_type != JobType::Technical {
                debug!(application_id = %record.id.0, "non-technical role left for manual review");
                report.skipped_manual += 1;
                continue;
            }

            match self.process_record(&record) {
                Ok(decision) => {
                    report.evaluated += 1;
                    match decision {
                        Decision::Passed => report.passed += 1,
                        Decision::Rejected => report.rejected += 1,
                    }
                    self.processed_total.fetch_add(1, Ordering::Relaxed);
                }
                Err(ItemError::Persist(err)) => {
                    report.errors += 1;
                    error!(
                        application_id = %record.id.0,
                        %err,
                        "evaluation not persisted; record left for retry"
                    );
                }
                Err(ItemError::Audit { decision, source }) => {
                    report.evaluated += 1;
                    match decision {
                        Decision::Passed => report.passed += 1,
                        Decision::Rejected => report.rejected += 1,
                    }
                    report.errors += 1;
                    self.processed_total.fetch_add(1, Ordering::Relaxed);
                    error!(
                        application_id = %record.id.0,
                        err = %source,
                        "audit append failed after the decision was recorded"
                    );
                }
            }
        }

        Ok(ScanOutcome::Completed(report))
    }

    /// Evaluate one record end to end: parse, score, persist, audit.
    fn process_record(&self, record: &ApplicationRecord) -> Result<Decision, ItemError> {
        let now = Utc::now();
        let profile = self.parser.parse(&record.resume_text);
        let outcome = self.engine.evaluate(&profile, &record.job.requirements);
        let decision = outcome.decision;
        let score = outcome.overall_score;
        let reasoning = outcome.reasoning.clone();

        let old_status = record.status;
        let new_status = match decision {
            Decision::Passed => ApplicationStatus::Reviewed,
            Decision::Rejected => ApplicationStatus::Rejected,
        };

        let mut updated = record.clone();
        updated.profile = Some(profile);
        updated.status = new_status;
        if decision == Decision::Rejected {
            updated.rejection_reason = Some(outcome.reasoning.clone());
        }
        // A pipeline without a matching stage advances the status only.
        if let Some(stage) = record.job.stage_for(new_status) {
            updated.current_stage = StageState::from_stage(stage, now);
        }
        updated.evaluation = Evaluation::decided(outcome, now);

        if let Err(err) = self.repository.update(updated) {
            // The decision is not durable. Leave a retry marker if the store
            // will take one; either way the record stays discoverable.
            let mut marked = record.clone();
            marked.evaluation = Evaluation::failed(err.to_string(), now);
            if let Err(mark_err) = self.repository.update(marked) {
                debug!(application_id = %record.id.0, %mark_err, "retry marker not stored");
            }
            return Err(ItemError::Persist(err));
        }

        info!(
            application_id = %record.id.0,
            score,
            decision = decision.label(),
            from = old_status.label(),
            to = new_status.label(),
            "application evaluated"
        );

        let entry = AuditEntry {
            application_id: record.id.clone(),
            actor: AuditActor::bot(),
            action: AuditAction::ApplicationEvaluated,
            details: AuditDetails {
                from_status: Some(old_status),
                to_status: Some(new_status),
                score: Some(score),
                reasoning: Some(reasoning),
                ..AuditDetails::default()
            },
            timestamp: now,
        };

        if let Err(err) = self.audit.append(entry) {
            // The decision stands; un-deciding would forge a second decision
            // on retry. Surface the gap on the record instead.
            if let Ok(Some(mut stored)) = self.repository.fetch(&record.id) {
                stored.evaluation.last_error = Some(format!("audit append failed: {err}"));
                if let Err(mark_err) = self.repository.update(stored) {
                    debug!(
                        application_id = %record.id.0,
                        %mark_err,
                        "audit failure marker not stored"
                    );
                }
            }
            return Err(ItemError::Audit {
                decision,
                source: err,
            });
        }

        Ok(decision)
    }

    pub fn stats(&self) -> WorkerStats {
        WorkerStats {
            processed_total: self.processed_total.load(Ordering::Relaxed),
            scan_in_flight: self.in_flight.load(Ordering::Relaxed),
        }
    }

    /// Start periodic operation: one scan immediately, then one per `period`.
    /// Ticks that fire while a scan is still running are skipped, and scan
    /// failures are logged without ending the loop.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(period_secs = period.as_secs(), "screening worker started");

            loop {
                ticker.tick().await;
                match self.run_once() {
                    Ok(ScanOutcome::Completed(report)) => {
                        if report.discovered > 0 {
                            info!(
                                discovered = report.discovered,
                                evaluated = report.evaluated,
                                passed = report.passed,
                                rejected = report.rejected,
                                skipped = report.skipped_manual,
                                errors = report.errors,
                                "screening scan finished"
                            );
                        }
                    }
                    Ok(ScanOutcome::AlreadyRunning) => {
                        debug!("previous scan still running; tick dropped");
                    }
                    Err(err) => {
                        error!(%err, "screening scan aborted");
                    }
                }
            }
        })
    }
}
