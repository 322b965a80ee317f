//! Skill Recognizer — turns free text into a deduplicated, case-insensitive skill set.
//!
//! Two independent strategies are merged by union:
//! - `dictionary`: known phrases matched against whitespace-normalized text.
//! - `heuristic`: the first few capitalized words of the raw text, as a rough
//!   proxy for technologies and proper nouns the dictionary does not know.

pub mod dictionary;
pub mod heuristic;

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

pub use dictionary::RecognitionDictionary;

/// Case-insensitive set of skill strings.
///
/// Keys are lowercased; the first spelling inserted is kept for display.
/// Iteration is sorted by the lowercase key, but callers must treat this as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    entries: BTreeMap<String, String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a skill. Blank input is ignored and an existing entry with the
    /// same lowercase form keeps its original spelling. Returns whether it was added.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        let key = skill.to_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, skill.to_string());
        true
    }

    /// Case-insensitive lookup that also treats punctuation variants as equal,
    /// so "CI/CD" is found in a set holding "ci-cd".
    pub fn contains(&self, skill: &str) -> bool {
        if self.entries.contains_key(&skill.trim().to_lowercase()) {
            return true;
        }
        let wanted = dictionary::normalize(skill);
        !wanted.is_empty() && self.entries.keys().any(|key| dictionary::normalize(key) == wanted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Union with `other`; entries already present in `self` win.
    pub fn union(mut self, other: SkillSet) -> SkillSet {
        for skill in other.entries.into_values() {
            self.insert(&skill);
        }
        self
    }

    /// The ", "-joined feature string fed to the vectorizer.
    /// The separator must match what the vectorizer was trained against.
    pub fn feature_text(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

impl Serialize for SkillSet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Recognizes skills in `text`: dictionary matches united with heuristic candidates.
pub fn recognize(text: &str, dictionary: &RecognitionDictionary) -> SkillSet {
    let matched = dictionary.match_text(text);
    let candidates = heuristic::capitalized_candidates(text);
    tracing::debug!(
        dictionary_matches = matched.len(),
        heuristic_candidates = candidates.len(),
        "Recognized skills"
    );
    matched.union(candidates)
}
