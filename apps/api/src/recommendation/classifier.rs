//! Classifier boundary — the trained model is a black box behind two traits.
//!
//! `ModelBundle` pairs a vectorizer with the classifier it was trained with.
//! Any backend that honours the traits can be swapped in at startup.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("model produced no prediction")]
    EmptyPrediction,
}

/// Sparse feature vector in the vectorizer's fixed feature space.
/// Entries are `(index, value)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    pub dimension: usize,
    pub entries: Vec<(usize, f64)>,
}

/// Turns raw text into the feature space the paired classifier expects.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, document: &str) -> FeatureVector;
}

/// A text classifier over a fixed, ordered label space.
pub trait CareerClassifier: Send + Sync {
    /// The label space, in the order `predict_proba` aligns to.
    fn labels(&self) -> &[String];

    /// Single best label.
    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError>;

    /// One probability per label, aligned to `labels()`.
    /// `None` when the backend cannot produce a distribution.
    fn predict_proba(&self, features: &FeatureVector) -> Option<Result<Vec<f64>, ClassifierError>> {
        let _ = features;
        None
    }
}

/// A vectorizer and the classifier trained against its feature space.
#[derive(Clone)]
pub struct ModelBundle {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub classifier: Arc<dyn CareerClassifier>,
}

impl ModelBundle {
    pub fn new(vectorizer: Arc<dyn Vectorizer>, classifier: Arc<dyn CareerClassifier>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("labels", &self.classifier.labels())
            .finish()
    }
}
