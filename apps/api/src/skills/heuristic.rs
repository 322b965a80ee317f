use once_cell::sync::Lazy;
use regex::Regex;

use super::SkillSet;

/// Maximum number of capitalized candidates taken from a single text.
pub const MAX_CANDIDATES: usize = 3;

/// An uppercase letter followed by at least two lowercase letters, as a whole word.
static CAPITALIZED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\p{Lu}\p{Ll}{2,}\b").expect("valid capitalized-word regex"));

/// The first few distinct capitalized words of the raw text, spelling preserved.
///
/// This is a crude stand-in for entity recognition: it also picks up sentence
/// starts and names. Keep it separate from dictionary matching so it can be
/// replaced without touching the rest of the recognizer.
pub fn capitalized_candidates(text: &str) -> SkillSet {
    let mut candidates = SkillSet::new();
    for m in CAPITALIZED_RE.find_iter(text) {
        if candidates.len() == MAX_CANDIDATES {
            break;
        }
        candidates.insert(m.as_str());
    }
    candidates
}
