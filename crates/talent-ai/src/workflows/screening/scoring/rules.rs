//! Per-dimension scoring rules. Each rule is a pure function from profile
//! data and a requirement to a score in `[0, 100]`.

use std::collections::BTreeSet;

use super::super::domain::ExperienceRange;
use super::super::similarity::best_similarity;

/// Minimum fuzzy similarity for a required skill to count as matched.
const SKILL_MATCH_THRESHOLD: f64 = 0.8;
/// Minimum best-match similarity for a required certification.
const CERTIFICATION_MATCH_THRESHOLD: f64 = 0.7;
/// Bonus per extra candidate skill beyond the requirements, and its cap.
const EXTRA_SKILL_BONUS: f64 = 2.0;
const EXTRA_SKILL_BONUS_CAP: f64 = 10.0;
/// Certification keywords that grant a flat premium when present.
const PREMIUM_CERTIFICATION_KEYWORDS: &[&str] = &["aws", "azure", "gcp", "kubernetes", "architect"];
const PREMIUM_CERTIFICATION_BONUS: f64 = 15.0;

/// Skills score plus the matched/missing lists the reasoning text needs.
#[derive(Debug, Clone)]
pub(crate) struct SkillsAssessment {
    pub(crate) score: f64,
    pub(crate) matched: Vec<String>,
    pub(crate) missing: Vec<String>,
}

pub(crate) fn score_skills(candidate: &BTreeSet<String>, required: &[String]) -> SkillsAssessment {
    if required.is_empty() {
        return SkillsAssessment {
            score: 100.0,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }
    if candidate.is_empty() {
        return SkillsAssessment {
            score: 0.0,
            matched: Vec::new(),
            missing: required.iter().map(|skill| skill.to_lowercase()).collect(),
        };
    }

    let candidate_lower: Vec<String> = candidate.iter().map(|skill| skill.to_lowercase()).collect();
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in required {
        let required_lower = skill.to_lowercase();
        let hit = candidate_lower.iter().any(|have| *have == required_lower)
            || best_similarity(&required_lower, candidate_lower.iter().map(String::as_str))
                > SKILL_MATCH_THRESHOLD;
        if hit {
            matched.push(required_lower);
        } else {
            missing.push(required_lower);
        }
    }

    let mut score = matched.len() as f64 / required.len() as f64 * 100.0;
    let extra = candidate.len().saturating_sub(matched.len());
    if extra > 0 {
        score += (extra as f64 * EXTRA_SKILL_BONUS).min(EXTRA_SKILL_BONUS_CAP);
    }

    SkillsAssessment {
        score: score.round().min(100.0),
        matched,
        missing,
    }
}

/// Inside the window scores full marks. Overqualification decays slowly with
/// a floor of 85; a shortfall costs 25 points per missing year.
pub(crate) fn score_experience(candidate_years: u32, range: &ExperienceRange) -> f64 {
    if range.is_unconstrained() {
        return 100.0;
    }

    let years = f64::from(candidate_years);
    let min = f64::from(range.min_years);
    let max = f64::from(range.max_years);

    if years >= min && years <= max {
        100.0
    } else if years > max {
        (100.0 - (years - max) * 2.0).max(85.0)
    } else {
        (100.0 - (min - years) * 25.0).max(0.0)
    }
}

/// A requirement counts as met when at least 60% of its words appear in the
/// candidate's combined education text.
pub(crate) fn score_education(candidate: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 100.0;
    }
    if candidate.is_empty() {
        return 0.0;
    }

    let candidate_text = candidate.join(" ").to_lowercase();
    let matched = required
        .iter()
        .filter(|requirement| {
            let requirement = requirement.to_lowercase();
            let keywords: Vec<&str> = requirement.split(' ').collect();
            let found = keywords
                .iter()
                .filter(|keyword| candidate_text.contains(**keyword))
                .count();
            found as f64 >= keywords.len() as f64 * 0.6
        })
        .count();

    (matched as f64 / required.len() as f64 * 100.0).round()
}

pub(crate) fn score_certifications(candidate: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 100.0;
    }
    if candidate.is_empty() {
        return 0.0;
    }

    let matched = required
        .iter()
        .filter(|requirement| {
            best_similarity(requirement, candidate.iter().map(String::as_str))
                > CERTIFICATION_MATCH_THRESHOLD
        })
        .count();

    let premium = candidate.iter().any(|certification| {
        let certification = certification.to_lowercase();
        PREMIUM_CERTIFICATION_KEYWORDS
            .iter()
            .any(|keyword| certification.contains(keyword))
    });

    let mut score = matched as f64 / required.len() as f64 * 100.0;
    if premium {
        score += PREMIUM_CERTIFICATION_BONUS;
    }

    score.round().min(100.0)
}
