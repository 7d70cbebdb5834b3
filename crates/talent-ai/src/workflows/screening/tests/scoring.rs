//! Scoring engine coverage: dimension rules, weighting, decision, and
//! reasoning.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::common::{technical_requirements, STRONG_RESUME};
use crate::workflows::screening::domain::{
    CandidateProfile, Decision, ExperienceRange, JobRequirements,
};
use crate::workflows::screening::parser::ResumeParser;
use crate::workflows::screening::scoring::ScoringEngine;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid reference date")
}

fn profile_with_skills(skills: &[&str]) -> CandidateProfile {
    CandidateProfile {
        skills: skills
            .iter()
            .map(|skill| skill.to_string())
            .collect::<BTreeSet<_>>(),
        ..CandidateProfile::default()
    }
}

#[test]
fn partial_skill_coverage_scores_two_thirds() {
    let engine = ScoringEngine::new();
    let profile = profile_with_skills(&["react", "node"]);
    let requirements = JobRequirements {
        skills: vec!["react".to_string(), "node".to_string(), "aws".to_string()],
        ..JobRequirements::default()
    };

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.breakdown.skills, 67.0);
}

#[test]
fn extra_skills_bonus_is_capped_at_ten() {
    let engine = ScoringEngine::new();
    let profile = profile_with_skills(&[
        "react", "vue", "angular", "node", "docker", "git", "jira", "redis",
    ]);
    let requirements = JobRequirements {
        skills: vec!["react".to_string(), "aws".to_string()],
        ..JobRequirements::default()
    };

    let outcome = engine.evaluate(&profile, &requirements);

    // 1 of 2 matched is 50, plus the capped +10 for seven extra skills.
    assert_eq!(outcome.breakdown.skills, 60.0);
}

#[test]
fn experience_deficit_costs_twenty_five_per_year() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile {
        total_experience_years: 3,
        ..CandidateProfile::default()
    };
    let requirements = JobRequirements {
        experience: ExperienceRange {
            min_years: 5,
            max_years: 8,
        },
        ..JobRequirements::default()
    };

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.breakdown.experience, 50.0);
}

#[test]
fn overqualification_decays_gently_with_a_floor() {
    let engine = ScoringEngine::new();
    let requirements = JobRequirements {
        experience: ExperienceRange {
            min_years: 5,
            max_years: 8,
        },
        ..JobRequirements::default()
    };

    let ten_years = CandidateProfile {
        total_experience_years: 10,
        ..CandidateProfile::default()
    };
    assert_eq!(
        engine.evaluate(&ten_years, &requirements).breakdown.experience,
        96.0
    );

    let twenty_years = CandidateProfile {
        total_experience_years: 20,
        ..CandidateProfile::default()
    };
    assert_eq!(
        engine.evaluate(&twenty_years, &requirements).breakdown.experience,
        85.0
    );
}

#[test]
fn unconstrained_experience_range_scores_full_marks() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    let requirements = JobRequirements {
        experience: ExperienceRange {
            min_years: 0,
            max_years: 20,
        },
        ..JobRequirements::default()
    };

    assert_eq!(
        engine.evaluate(&profile, &requirements).breakdown.experience,
        100.0
    );
}

#[test]
fn education_requirement_needs_sixty_percent_of_its_words() {
    let engine = ScoringEngine::new();
    let requirements = JobRequirements {
        education: vec!["Bachelor in Computer Science".to_string()],
        ..JobRequirements::default()
    };

    let matched = CandidateProfile {
        education: vec!["bachelor of science in computer science".to_string()],
        ..CandidateProfile::default()
    };
    assert_eq!(
        engine.evaluate(&matched, &requirements).breakdown.education,
        100.0
    );

    let unmatched = CandidateProfile {
        education: vec!["diploma in web design".to_string()],
        ..CandidateProfile::default()
    };
    assert_eq!(
        engine.evaluate(&unmatched, &requirements).breakdown.education,
        0.0
    );
}

#[test]
fn certification_prefix_matches_and_premium_cap_to_one_hundred() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile {
        certifications: vec!["AWS Certified Solutions Architect".to_string()],
        ..CandidateProfile::default()
    };
    let requirements = JobRequirements {
        certifications: vec!["AWS Certified".to_string()],
        ..JobRequirements::default()
    };

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.breakdown.certifications, 100.0);
}

#[test]
fn required_certifications_with_none_held_score_zero() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    let requirements = JobRequirements {
        certifications: vec!["AWS Certified".to_string()],
        ..JobRequirements::default()
    };

    assert_eq!(
        engine.evaluate(&profile, &requirements).breakdown.certifications,
        0.0
    );
}

#[test]
fn absent_requirements_default_to_full_marks() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile {
        certifications: vec!["comptia".to_string()],
        ..CandidateProfile::default()
    };
    let requirements = JobRequirements::default();

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.breakdown.skills, 100.0);
    assert_eq!(outcome.breakdown.education, 100.0);
    assert_eq!(outcome.breakdown.certifications, 100.0);
}

#[test]
fn decision_compares_overall_score_to_passing_threshold_inclusively() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    // Sub-scores land at skills 0, experience 100, education 100,
    // certifications 100: overall 60 under default weights.
    let mut requirements = JobRequirements {
        skills: vec!["react".to_string()],
        ..JobRequirements::default()
    };

    requirements.passing_score = 60;
    let outcome = engine.evaluate(&profile, &requirements);
    assert_eq!(outcome.overall_score, 60);
    assert_eq!(outcome.decision, Decision::Passed);

    requirements.passing_score = 61;
    let outcome = engine.evaluate(&profile, &requirements);
    assert_eq!(outcome.decision, Decision::Rejected);
    assert!(outcome
        .reasoning
        .contains("Does not meet minimum qualifications"));
}

#[test]
fn aligned_dimensions_yield_full_confidence() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    let requirements = JobRequirements::default();

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.overall_score, 100);
    assert_eq!(outcome.confidence, 1.0);
}

#[test]
fn scattered_dimensions_floor_confidence() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    let requirements = JobRequirements {
        skills: vec!["react".to_string()],
        certifications: vec!["AWS Certified".to_string()],
        ..JobRequirements::default()
    };

    let outcome = engine.evaluate(&profile, &requirements);

    // Sub-scores 0/100/100/0 give a variance of 2500; confidence clamps.
    assert_eq!(outcome.confidence, 0.6);
}

#[test]
fn empty_profile_scores_low_but_in_range() {
    let engine = ScoringEngine::new();
    let profile = CandidateProfile::default();
    let requirements = technical_requirements();

    let outcome = engine.evaluate(&profile, &requirements);

    assert_eq!(outcome.decision, Decision::Rejected);
    for score in outcome.breakdown.values() {
        assert!((0.0..=100.0).contains(&score));
    }
    assert!(outcome.overall_score <= 100);
    assert!((0.6..=1.0).contains(&outcome.confidence));
}

#[test]
fn evaluation_is_deterministic() {
    let engine = ScoringEngine::new();
    let parser = ResumeParser::new();
    let profile = parser.parse_as_of(STRONG_RESUME, reference_date());
    let requirements = technical_requirements();

    let first = engine.evaluate(&profile, &requirements);
    let second = engine.evaluate(&profile, &requirements);

    assert_eq!(first, second);
}

#[test]
fn reasoning_enumerates_strengths_for_passes() {
    let engine = ScoringEngine::new();
    let parser = ResumeParser::new();
    let profile = parser.parse_as_of(STRONG_RESUME, reference_date());

    let outcome = engine.evaluate(&profile, &technical_requirements());

    assert_eq!(outcome.decision, Decision::Passed);
    assert!(outcome.reasoning.contains("Candidate passed"));
    assert!(outcome.reasoning.contains("strong skills match (5/5)"));
    assert!(outcome.reasoning.contains("Recommended for next stage"));
}

#[test]
fn reasoning_lists_missing_skills_for_rejections() {
    let engine = ScoringEngine::new();
    let profile = profile_with_skills(&["html", "css"]);

    let outcome = engine.evaluate(&profile, &technical_requirements());

    assert_eq!(outcome.decision, Decision::Rejected);
    assert!(outcome.reasoning.contains("Candidate rejected"));
    assert!(outcome.reasoning.contains("skills gap"));
    assert!(outcome.reasoning.contains("mongodb"));
    assert!(outcome.reasoning.contains("insufficient experience"));
}
