//! Resume parsing: free-form text in, a [`CandidateProfile`] out.
//!
//! Extraction is best-effort and never fails; text without recognizable
//! structure simply yields an empty profile. Dates are resolved against an
//! explicit reference date so "present" is deterministic under test.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use super::domain::{CandidateProfile, ExperienceEntry};
use super::similarity::similarity;
use super::taxonomy::{SkillTaxonomy, CERTIFICATION_PATTERNS};

/// Minimum similarity between a resume token and a canonical skill name for
/// the fuzzy pass to claim a detection.
const FUZZY_SKILL_THRESHOLD: f64 = 0.85;

/// Lines containing any of these are treated as education statements.
const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "diploma",
    "b.tech",
    "b.e",
    "m.tech",
    "m.s",
    "mba",
    "bba",
    "computer science",
    "engineering",
    "information technology",
];

/// Extracts structured candidate data from raw resume text.
///
/// All patterns are compiled once at construction; the taxonomy is the
/// process-wide immutable instance.
pub struct ResumeParser {
    taxonomy: &'static SkillTaxonomy,
    skill_patterns: Vec<(&'static str, Regex)>,
    experience_with_company: Regex,
    experience_year_first: Regex,
    certification_patterns: Vec<Regex>,
    explicit_years: Regex,
    year_range: Regex,
}

impl ResumeParser {
    pub fn new() -> Self {
        let taxonomy = SkillTaxonomy::builtin();
        let skill_patterns = taxonomy
            .iter()
            .map(|(canonical, entry)| {
                let mut alternatives = vec![regex::escape(canonical)];
                alternatives.extend(entry.synonyms.iter().map(|synonym| regex::escape(synonym)));
                let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
                (canonical, Regex::new(&pattern).expect("skill pattern compiles"))
            })
            .collect();

        Self {
            taxonomy,
            skill_patterns,
            experience_with_company: Regex::new(
                r"([a-z ]+)\s+at\s+([a-z &]+)\s*\(?\s*(\d{4})\s*-\s*(\d{4}|present)\s*\)?",
            )
            .expect("experience pattern compiles"),
            experience_year_first: Regex::new(r"(\d{4})\s*-\s*(\d{4}|present)\s*:?\s*([a-z ]+)")
                .expect("experience pattern compiles"),
            certification_patterns: CERTIFICATION_PATTERNS
                .iter()
                .map(|pattern| Regex::new(pattern).expect("certification pattern compiles"))
                .collect(),
            explicit_years: Regex::new(r"(\d+)\+?\s*years?\s+(?:of\s+)?experience")
                .expect("experience phrase pattern compiles"),
            year_range: Regex::new(r"(\d{4})\s*-\s*(\d{4}|present)")
                .expect("year range pattern compiles"),
        }
    }

    /// Parse with today as the reference date for open-ended ranges.
    pub fn parse(&self, resume_text: &str) -> CandidateProfile {
        self.parse_as_of(resume_text, Utc::now().date_naive())
    }

    /// Parse with an explicit reference date.
    pub fn parse_as_of(&self, resume_text: &str, today: NaiveDate) -> CandidateProfile {
        let clean = preprocess(resume_text);

        CandidateProfile {
            skills: self.extract_skills(&clean),
            experience: self.extract_experience(&clean, today),
            education: extract_education(&clean),
            certifications: self.extract_certifications(&clean),
            total_experience_years: self.total_experience_years(&clean, today),
        }
    }

    fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let mut detected = BTreeSet::new();

        for (canonical, pattern) in &self.skill_patterns {
            if pattern.is_match(text) {
                detected.insert((*canonical).to_string());
            }
        }

        // Fuzzy pass catches typoed skill names the word-boundary pass
        // misses. Only the closest canonical may claim a token, so "java"
        // never also counts as "javascript".
        for token in text.split_whitespace() {
            let mut best: Option<(&'static str, f64)> = None;
            for canonical in self.taxonomy.canonical_names() {
                let score = similarity(token, canonical);
                if best.map_or(true, |(_, current)| score > current) {
                    best = Some((canonical, score));
                }
            }
            if let Some((canonical, score)) = best {
                if score > FUZZY_SKILL_THRESHOLD {
                    detected.insert(canonical.to_string());
                }
            }
        }

        detected
    }

    fn extract_experience(&self, text: &str, today: NaiveDate) -> Vec<ExperienceEntry> {
        let mut entries = Vec::new();

        // "<title> at <company> (2019-2023)"
        for caps in self.experience_with_company.captures_iter(text) {
            if let Some(entry) = build_entry(&caps[1], Some(&caps[2]), &caps[3], &caps[4], today) {
                entries.push(entry);
            }
        }

        // "2019-2023: <title>" with no company given
        for caps in self.experience_year_first.captures_iter(text) {
            if let Some(entry) = build_entry(&caps[3], None, &caps[1], &caps[2], today) {
                entries.push(entry);
            }
        }

        entries
    }

    fn extract_certifications(&self, text: &str) -> Vec<String> {
        self.certification_patterns
            .iter()
            .filter_map(|pattern| pattern.find(text).map(|found| found.as_str().to_string()))
            .collect()
    }

    fn total_experience_years(&self, text: &str, today: NaiveDate) -> u32 {
        // An explicit "N years of experience" claim wins over inference.
        if let Some(caps) = self.explicit_years.captures(text) {
            if let Ok(years) = caps[1].parse::<u32>() {
                return years;
            }
        }

        // Otherwise sum every year range found anywhere in the text.
        let mut total_months: i64 = 0;
        for caps in self.year_range.captures_iter(text) {
            let start: i64 = match caps[1].parse() {
                Ok(year) => year,
                Err(_) => continue,
            };
            let end: i64 = if &caps[2] == "present" {
                i64::from(today.year())
            } else {
                match caps[2].parse() {
                    Ok(year) => year,
                    Err(_) => continue,
                }
            };
            total_months += (end - start) * 12;
        }

        (total_months / 12).max(0) as u32
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case the text, replace characters outside word characters and basic
/// punctuation with spaces, and collapse runs of horizontal whitespace. Line
/// breaks are preserved because education extraction is line-oriented.
fn preprocess(text: &str) -> String {
    text.lines()
        .map(|line| {
            let mut cleaned = String::with_capacity(line.len());
            for ch in line.to_lowercase().chars() {
                if ch.is_alphanumeric()
                    || ch.is_whitespace()
                    || matches!(ch, '_' | '.' | ',' | '-' | '(' | ')')
                {
                    cleaned.push(ch);
                } else {
                    cleaned.push(' ');
                }
            }
            cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_entry(
    title: &str,
    company: Option<&str>,
    start_year: &str,
    end_year: &str,
    today: NaiveDate,
) -> Option<ExperienceEntry> {
    let start_year: i32 = start_year.parse().ok()?;
    let start_date = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
    let end_date = if end_year == "present" {
        today
    } else {
        let end_year: i32 = end_year.parse().ok()?;
        NaiveDate::from_ymd_opt(end_year, 1, 1)?
    };

    Some(ExperienceEntry {
        title: title.trim().to_string(),
        company: company
            .map_or_else(|| "Not specified".to_string(), |name| name.trim().to_string()),
        duration_months: months_between(start_date, end_date),
        start_date,
        end_date,
    })
}

/// Whole-month difference; negative when the range is inverted.
fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

fn extract_education(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| EDUCATION_KEYWORDS.iter().any(|keyword| line.contains(keyword)))
        .map(str::to_string)
        .collect()
}
