//! Decision, confidence, and reasoning policy layered on top of the raw
//! dimension scores.

use super::super::domain::Decision;
use super::rules::SkillsAssessment;

/// Sub-score thresholds quoted in the reasoning text.
const STRONG_SKILLS: f64 = 80.0;
const STRONG_EXPERIENCE: f64 = 90.0;
const STRONG_EDUCATION: f64 = 80.0;
const STRONG_CERTIFICATIONS: f64 = 80.0;
const WEAK_SKILLS: f64 = 60.0;
const WEAK_EXPERIENCE: f64 = 50.0;
const WEAK_EDUCATION: f64 = 50.0;

/// The threshold is inclusive: scoring exactly the passing score passes.
pub(crate) fn decide(overall_score: u8, passing_score: u8) -> Decision {
    if overall_score >= passing_score {
        Decision::Passed
    } else {
        Decision::Rejected
    }
}

/// Confidence from the population variance of the four sub-scores: aligned
/// dimensions mean a surer verdict. Clamped to `[0.6, 1.0]` and rounded to
/// two decimals.
pub(crate) fn confidence(scores: [f64; 4]) -> f64 {
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores
        .iter()
        .map(|score| (score - mean).powi(2))
        .sum::<f64>()
        / scores.len() as f64;

    let raw = (1.0 - variance / 1000.0).max(0.6);
    (raw * 100.0).round() / 100.0
}

/// Human-readable explanation of the verdict, naming notable strengths for
/// passes and concrete gaps for rejections.
pub(crate) fn reasoning(
    overall_score: u8,
    passing_score: u8,
    decision: Decision,
    skills: &SkillsAssessment,
    experience_score: f64,
    education_score: f64,
    certifications_score: f64,
) -> String {
    let mut text = format!("Overall score: {overall_score}/100 (threshold: {passing_score}). ");

    match decision {
        Decision::Passed => {
            text.push_str("Candidate passed. ");

            let mut strengths = Vec::new();
            if skills.score >= STRONG_SKILLS {
                strengths.push(format!(
                    "strong skills match ({}/{})",
                    skills.matched.len(),
                    skills.matched.len() + skills.missing.len()
                ));
            }
            if experience_score >= STRONG_EXPERIENCE {
                strengths.push("excellent experience level".to_string());
            }
            if education_score >= STRONG_EDUCATION {
                strengths.push("education requirements met".to_string());
            }
            if certifications_score >= STRONG_CERTIFICATIONS {
                strengths.push("relevant certifications".to_string());
            }
            if !strengths.is_empty() {
                text.push_str(&format!("Strengths: {}. ", strengths.join(", ")));
            }

            text.push_str("Recommended for next stage.");
        }
        Decision::Rejected => {
            text.push_str("Candidate rejected. ");

            let mut reasons = Vec::new();
            if skills.score < WEAK_SKILLS {
                reasons.push(format!("skills gap (missing: {})", skills.missing.join(", ")));
            }
            if experience_score < WEAK_EXPERIENCE {
                reasons.push("insufficient experience".to_string());
            }
            if education_score < WEAK_EDUCATION {
                reasons.push("education requirements not met".to_string());
            }
            if !reasons.is_empty() {
                text.push_str(&format!("Reasons: {}. ", reasons.join("; ")));
            }

            text.push_str("Does not meet minimum qualifications.");
        }
    }

    text
}
