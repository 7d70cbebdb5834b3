use crate::infra::{InMemoryApplicationRepository, InMemoryAuditLog};
use chrono::Local;
use clap::Args;
use std::sync::Arc;
use talent_ai::error::AppError;
use talent_ai::workflows::screening::{
    ApplicationRepository, ApplicationService, ApplicationSubmission, ExperienceRange,
    JobRequirements, JobSnapshot, JobType, ScanOutcome, ScoreWeights, ScreeningWorker,
    WorkflowStage,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each application's audit timeline at the end of the demo.
    #[arg(long)]
    pub(crate) show_timeline: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { show_timeline } = args;

    println!("Resume screening demo ({})", Local::now().date_naive());

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = Arc::new(ApplicationService::new(repository.clone(), audit.clone()));
    let worker = ScreeningWorker::new(repository.clone(), audit);

    println!("\nApplication intake");
    let candidates = [
        ("Jordan Mills", technical_job(), STRONG_CANDIDATE_RESUME),
        ("Casey Flint", technical_job(), JUNIOR_CANDIDATE_RESUME),
        ("Rowan Ashe", coordinator_job(), COORDINATOR_RESUME),
    ];
    let mut submitted = Vec::new();
    for (applicant, job, resume_text) in candidates {
        let job_title = job.title.clone();
        match service.submit(ApplicationSubmission {
            applicant: applicant.to_string(),
            job,
            resume_text: resume_text.to_string(),
        }) {
            Ok(record) => {
                println!(
                    "- {} -> {} ({}, status {})",
                    record.applicant,
                    record.id.0,
                    job_title,
                    record.status.label()
                );
                submitted.push(record.id);
            }
            Err(err) => println!("- Submission from {applicant} rejected: {err}"),
        }
    }

    println!("\nScreening scan");
    match worker.run_once()? {
        ScanOutcome::Completed(report) => println!(
            "- Scanned {} pending: {} evaluated ({} passed, {} rejected), {} left for manual review, {} errors",
            report.discovered,
            report.evaluated,
            report.passed,
            report.rejected,
            report.skipped_manual,
            report.errors
        ),
        ScanOutcome::AlreadyRunning => println!("- A scan was already in progress"),
    }

    println!("\nApplication outcomes");
    for id in &submitted {
        match repository.fetch(id) {
            Ok(Some(record)) => {
                let view = record.status_view();
                match (view.decision, view.overall_score) {
                    (Some(decision), Some(score)) => println!(
                        "- {} ({}): {decision} with score {score}, now in stage {}",
                        id.0, record.applicant, view.stage
                    ),
                    _ => println!(
                        "- {} ({}): status {}, {}",
                        id.0, record.applicant, view.status, view.decision_rationale
                    ),
                }
            }
            Ok(None) => println!("- {}: no longer in the store", id.0),
            Err(err) => println!("- {}: repository unavailable: {err}", id.0),
        }
    }

    println!("\nPipeline snapshot");
    match service.pipeline_stats() {
        Ok(stats) => {
            println!(
                "- {} applications | {} decided ({} passed, {} rejected) | {} awaiting screening",
                stats.total,
                stats.decided,
                stats.passed,
                stats.rejected_by_screening,
                stats.awaiting_screening
            );
            if let Some(average) = stats.average_score {
                println!("- Average screening score: {average:.1}");
            }
        }
        Err(err) => println!("- Pipeline stats unavailable: {err}"),
    }
    println!(
        "- Worker has processed {} applications in total",
        worker.stats().processed_total
    );

    if show_timeline {
        println!("\nAudit timelines");
        for id in &submitted {
            println!("- {}", id.0);
            match service.timeline(id) {
                Ok(entries) => {
                    for entry in entries {
                        println!(
                            "    {} {} by {} ({})",
                            entry.timestamp.format("%H:%M:%S"),
                            entry.action.label(),
                            entry.actor.name,
                            entry.actor.kind.label()
                        );
                    }
                }
                Err(err) => println!("    timeline unavailable: {err}"),
            }
        }
    }

    Ok(())
}

fn technical_job() -> JobSnapshot {
    JobSnapshot {
        title: "Senior Full Stack Developer".to_string(),
        job_type: JobType::Technical,
        requirements: JobRequirements {
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
        },
        workflow_stages: WorkflowStage::default_pipeline(),
    }
}

fn coordinator_job() -> JobSnapshot {
    JobSnapshot {
        title: "Hiring Coordinator".to_string(),
        job_type: JobType::NonTechnical,
        requirements: JobRequirements::default(),
        workflow_stages: WorkflowStage::default_pipeline(),
    }
}

const STRONG_CANDIDATE_RESUME: &str = "\
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

const JUNIOR_CANDIDATE_RESUME: &str = "\
Casey Flint
Frontend developer with 2 years of experience.

Skills: HTML, CSS, JavaScript

Experience:
junior developer at pixel studio (2023-present)

Education:
Diploma in Web Design
";

const COORDINATOR_RESUME: &str = "\
Rowan Ashe
People operations generalist with a background in onboarding and scheduling.

Skills: Scheduling, Onboarding, Communication
";
