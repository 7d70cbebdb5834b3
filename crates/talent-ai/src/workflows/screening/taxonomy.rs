//! Immutable screening configuration: the skill taxonomy and the
//! certification phrases the parser scans for.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Broad skill family a canonical skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Cloud,
    Tools,
}

impl SkillCategory {
    pub const fn label(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::Devops => "devops",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Tools => "tools",
        }
    }
}

/// Metadata attached to one canonical skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillEntry {
    pub synonyms: &'static [&'static str],
    pub category: SkillCategory,
    pub weight: f32,
}

type SkillRow = (&'static str, &'static [&'static str], SkillCategory, f32);

const SKILL_ROWS: &[SkillRow] = &[
    ("react", &["reactjs", "react.js", "react js"], SkillCategory::Frontend, 1.0),
    ("vue", &["vuejs", "vue.js", "vue js"], SkillCategory::Frontend, 1.0),
    ("angular", &["angularjs", "angular.js"], SkillCategory::Frontend, 1.0),
    ("javascript", &["js", "ecmascript", "es6"], SkillCategory::Frontend, 1.0),
    ("typescript", &["ts"], SkillCategory::Frontend, 1.0),
    ("html", &["html5"], SkillCategory::Frontend, 0.8),
    ("css", &["css3", "scss", "sass"], SkillCategory::Frontend, 0.8),
    ("node", &["nodejs", "node.js", "node js"], SkillCategory::Backend, 1.0),
    ("express", &["expressjs", "express.js"], SkillCategory::Backend, 1.0),
    ("python", &["py"], SkillCategory::Backend, 1.0),
    ("django", &[], SkillCategory::Backend, 1.0),
    ("flask", &[], SkillCategory::Backend, 1.0),
    ("java", &[], SkillCategory::Backend, 1.0),
    ("spring", &["spring boot", "springboot"], SkillCategory::Backend, 1.0),
    ("mongodb", &["mongo"], SkillCategory::Database, 1.0),
    ("postgresql", &["postgres", "psql"], SkillCategory::Database, 1.0),
    ("mysql", &["sql"], SkillCategory::Database, 1.0),
    ("redis", &[], SkillCategory::Database, 1.0),
    ("docker", &[], SkillCategory::Devops, 1.0),
    ("kubernetes", &["k8s"], SkillCategory::Devops, 1.0),
    ("aws", &["amazon web services"], SkillCategory::Cloud, 1.0),
    ("azure", &["microsoft azure"], SkillCategory::Cloud, 1.0),
    ("gcp", &["google cloud"], SkillCategory::Cloud, 1.0),
    ("git", &["github", "gitlab", "bitbucket"], SkillCategory::Tools, 0.9),
    ("jenkins", &[], SkillCategory::Tools, 0.9),
    ("jira", &[], SkillCategory::Tools, 0.7),
];

/// Canonical skill names mapped to the synonyms resumes may use for them.
#[derive(Debug)]
pub struct SkillTaxonomy {
    entries: BTreeMap<&'static str, SkillEntry>,
}

impl SkillTaxonomy {
    /// The built-in taxonomy, constructed once per process.
    pub fn builtin() -> &'static SkillTaxonomy {
        static TAXONOMY: OnceLock<SkillTaxonomy> = OnceLock::new();
        TAXONOMY.get_or_init(|| {
            let mut entries = BTreeMap::new();
            for (canonical, synonyms, category, weight) in SKILL_ROWS.iter().copied() {
                entries.insert(
                    canonical,
                    SkillEntry {
                        synonyms,
                        category,
                        weight,
                    },
                );
            }
            SkillTaxonomy { entries }
        })
    }

    pub fn get(&self, canonical: &str) -> Option<&SkillEntry> {
        self.entries.get(canonical)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SkillEntry)> + '_ {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Certification phrases the parser recognizes; the first occurrence of each
/// is kept.
pub(crate) const CERTIFICATION_PATTERNS: &[&str] = &[
    r"aws\s+certified",
    r"azure\s+certified",
    r"google\s+cloud\s+certified",
    r"cisco\s+certified",
    r"pmp\s+certified",
    r"certified\s+kubernetes",
    r"oracle\s+certified",
    r"microsoft\s+certified",
    r"certified\s+scrum\s+master",
    r"comptia",
];
