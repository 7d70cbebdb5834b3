//! Candidate scoring: four weighted dimensions, an inclusive threshold
//! decision, and an explainable reasoning string.

mod policy;
mod rules;

use super::domain::{CandidateProfile, EvaluationOutcome, JobRequirements, ScoreBreakdown};

/// Stateless evaluator applying a job's requirements to a parsed profile.
///
/// Evaluation is deterministic: identical inputs always produce identical
/// outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
    ) -> EvaluationOutcome {
        let skills = rules::score_skills(&profile.skills, &requirements.skills);
        let experience_score =
            rules::score_experience(profile.total_experience_years, &requirements.experience);
        let education_score = rules::score_education(&profile.education, &requirements.education);
        let certifications_score =
            rules::score_certifications(&profile.certifications, &requirements.certifications);

        let breakdown = ScoreBreakdown {
            skills: skills.score,
            experience: experience_score,
            education: education_score,
            certifications: certifications_score,
        };

        let weights = requirements.weights;
        let weighted = (skills.score * f64::from(weights.skills_match)
            + experience_score * f64::from(weights.experience_match)
            + education_score * f64::from(weights.education_match)
            + certifications_score * f64::from(weights.certifications_match))
            / 100.0;
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        let decision = policy::decide(overall_score, requirements.passing_score);
        let confidence = policy::confidence(breakdown.values());
        let reasoning = policy::reasoning(
            overall_score,
            requirements.passing_score,
            decision,
            &skills,
            experience_score,
            education_score,
            certifications_score,
        );

        EvaluationOutcome {
            overall_score,
            breakdown,
            decision,
            reasoning,
            confidence,
        }
    }
}
