use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::SkillSet;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Built-in recognition phrases. Matching is against normalized text, so
/// punctuation inside a phrase ("node.js", "ci/cd") collapses to single spaces.
const BUILTIN_PHRASES: &[&str] = &[
    // Languages
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "golang",
    "kotlin",
    "swift",
    "ruby",
    "php",
    "scala",
    "sql",
    "html",
    "css",
    // Data & ML
    "machine learning",
    "deep learning",
    "data analysis",
    "data visualization",
    "statistics",
    "natural language processing",
    "computer vision",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "big data",
    "spark",
    "hadoop",
    "etl",
    "excel",
    "tableau",
    "power bi",
    // Web & backend
    "react",
    "angular",
    "node.js",
    "django",
    "flask",
    "rest api",
    "microservices",
    "postgresql",
    "mysql",
    "mongodb",
    // Infrastructure
    "aws",
    "azure",
    "google cloud",
    "docker",
    "kubernetes",
    "linux",
    "git",
    "ci/cd",
    "devops",
    "terraform",
    // Security
    "cybersecurity",
    "network security",
    "penetration testing",
    // Engineering practice
    "algorithms",
    "data structures",
    "system design",
    "testing",
    // Design
    "ui design",
    "ux design",
    "figma",
    "user research",
    // Business
    "business analysis",
    "requirements gathering",
    "project management",
    "financial modeling",
    "agile",
    "scrum",
    "marketing",
    "seo",
    // Soft skills
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "stakeholder management",
];

/// Lowercases `text`, keeps maximal runs of word characters and rejoins them
/// with single spaces.
pub fn normalize(text: &str) -> String {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A known phrase: the spelling reported to callers and the key it is matched by.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Phrase {
    display: String,
    key: String,
}

/// Ordered list of known skill phrases. Matching uses the normalized key;
/// results carry the phrase as written ("ci/cd", not "ci cd").
#[derive(Debug, Clone)]
pub struct RecognitionDictionary {
    phrases: Vec<Phrase>,
}

impl RecognitionDictionary {
    pub fn builtin() -> Self {
        Self::from_phrases(BUILTIN_PHRASES.iter().copied())
    }

    /// Drops phrases that normalize to nothing and later phrases sharing a key.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<Phrase> = Vec::new();
        for phrase in phrases {
            let display = phrase.as_ref().trim();
            let key = normalize(display);
            if !key.is_empty() && !entries.iter().any(|p| p.key == key) {
                entries.push(Phrase {
                    display: display.to_string(),
                    key,
                });
            }
        }
        Self { phrases: entries }
    }

    /// Loads a JSON array of phrases.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill dictionary {}", path.display()))?;
        let phrases: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("Skill dictionary {} is not a JSON string array", path.display()))?;
        Ok(Self::from_phrases(phrases))
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Every phrase whose key occurs as a substring of the normalized text.
    pub fn match_text(&self, text: &str) -> SkillSet {
        let normalized = normalize(text);
        self.phrases
            .iter()
            .filter(|phrase| normalized.contains(phrase.key.as_str()))
            .map(|phrase| phrase.display.as_str())
            .collect()
    }
}
