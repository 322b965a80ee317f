//! Linear model backend loaded from exported JSON artifacts.
//!
//! Vectorizer artifact:
//! `{"vocabulary": {"term": idx}, "idf": [..], "ngram_range": [1, 2], "sublinear_tf": false}`
//!
//! Classifier artifact (one coefficient row per class, multinomial):
//! `{"classes": [..], "coef": [[..]], "intercept": [..], "supports_probability": true}`

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, ensure, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::recommendation::classifier::{
    CareerClassifier, ClassifierError, FeatureVector, ModelBundle, Vectorizer,
};

/// Tokens of two or more word characters.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Vectorizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let vectorizer: Self = read_json(path)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        ensure!(
            min_n >= 1 && min_n <= max_n,
            "invalid ngram_range ({min_n}, {max_n})"
        );
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            bail!(
                "vocabulary term '{term}' has index {idx} outside idf length {}",
                self.idf.len()
            );
        }
        Ok(())
    }

    fn terms(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, document: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (idx, tf * self.idf[idx])
            })
            .collect();
        entries.sort_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut entries {
                *v /= norm;
            }
        }

        FeatureVector {
            dimension: self.dimension(),
            entries,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    #[serde(default = "default_true")]
    supports_probability: bool,
}

impl LinearClassifier {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let classifier: Self = read_json(path)?;
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn dimension(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.classes.is_empty(), "classifier has no classes");
        ensure!(
            self.coef.len() == self.classes.len() && self.intercept.len() == self.classes.len(),
            "expected one coef row and intercept per class ({} classes, {} rows, {} intercepts)",
            self.classes.len(),
            self.coef.len(),
            self.intercept.len()
        );
        let dim = self.dimension();
        ensure!(
            self.coef.iter().all(|row| row.len() == dim),
            "coef rows have inconsistent lengths"
        );
        Ok(())
    }

    fn decision_scores(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        if features.dimension != self.dimension() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.dimension(),
                actual: features.dimension,
            });
        }

        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| {
                bias + features
                    .entries
                    .iter()
                    .map(|&(idx, value)| row[idx] * value)
                    .sum::<f64>()
            })
            .collect())
    }
}

impl CareerClassifier for LinearClassifier {
    fn labels(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        let scores = self.decision_scores(features)?;
        let mut best: Option<(usize, f64)> = None;
        for (i, &score) in scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((i, score)),
            }
        }
        best.map(|(i, _)| self.classes[i].clone())
            .ok_or(ClassifierError::EmptyPrediction)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Option<Result<Vec<f64>, ClassifierError>> {
        if !self.supports_probability {
            return None;
        }
        Some(self.decision_scores(features).map(|scores| softmax(&scores)))
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed model artifact {}", path.display()))
}

/// Loads the classifier and vectorizer artifacts and checks they share a feature space.
pub fn load_bundle(model_path: &Path, vectorizer_path: &Path) -> Result<ModelBundle> {
    let classifier = LinearClassifier::from_json_file(model_path)?;
    let vectorizer = TfidfVectorizer::from_json_file(vectorizer_path)?;

    ensure!(
        classifier.dimension() == vectorizer.dimension(),
        "classifier expects {} features but vectorizer produces {}",
        classifier.dimension(),
        vectorizer.dimension()
    );

    Ok(ModelBundle::new(Arc::new(vectorizer), Arc::new(classifier)))
}
