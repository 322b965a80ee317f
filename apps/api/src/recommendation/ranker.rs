//! Recommendation Ranker — asks the classifier for a label distribution over the
//! skill set and keeps the top careers.
//!
//! Primary path: `predict_proba` → top 3 by probability, score = round(p × 100).
//! Fallback path: a single `predict` label with a placeholder score, used only when
//! no usable distribution is available. Reports carry `RankingMode` so callers and
//! tests can tell the two apart.

use serde::Serialize;

use crate::errors::AppError;
use crate::recommendation::classifier::ModelBundle;
use crate::skills::SkillSet;

/// Maximum careers returned on the probabilistic path.
pub const TOP_K: usize = 3;

/// Score reported for the single fallback label. Not a confidence.
pub const FALLBACK_SCORE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    Probabilistic,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCareer {
    pub career: String,
    pub score: u8, // 0 – 100
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub mode: RankingMode,
    pub careers: Vec<RankedCareer>,
}

/// Ranks careers for `skills`. Fails fast with `ModelUnavailable` when no model is loaded.
pub fn rank(skills: &SkillSet, model: Option<&ModelBundle>) -> Result<Ranking, AppError> {
    let model = model.ok_or(AppError::ModelUnavailable)?;

    let features = model.vectorizer.transform(&skills.feature_text());
    let labels = model.classifier.labels();

    match model.classifier.predict_proba(&features) {
        Some(Ok(probabilities)) if probabilities.len() == labels.len() => {
            return Ok(Ranking {
                mode: RankingMode::Probabilistic,
                careers: top_careers(labels, &probabilities, TOP_K),
            });
        }
        Some(Ok(probabilities)) => tracing::warn!(
            expected = labels.len(),
            actual = probabilities.len(),
            "Probability vector does not match label space"
        ),
        Some(Err(e)) => tracing::warn!("Probability estimate failed: {e}"),
        None => tracing::debug!("Classifier exposes no probability estimates"),
    }

    let career = model
        .classifier
        .predict(&features)
        .map_err(|e| AppError::Classifier(e.to_string()))?;
    tracing::warn!(%career, "Falling back to single-label ranking");

    Ok(Ranking {
        mode: RankingMode::Fallback,
        careers: vec![RankedCareer {
            career,
            score: FALLBACK_SCORE,
        }],
    })
}

/// The `k` most probable labels, highest first. Equal probabilities keep
/// label-space order. Non-finite probabilities rank as zero.
fn top_careers(labels: &[String], probabilities: &[f64], k: usize) -> Vec<RankedCareer> {
    let clean: Vec<f64> = probabilities
        .iter()
        .map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 })
        .collect();

    let mut order: Vec<usize> = (0..labels.len()).collect();
    // sort_by is stable, so ties stay in label order
    order.sort_by(|&a, &b| clean[b].total_cmp(&clean[a]));

    order
        .into_iter()
        .take(k)
        .map(|i| RankedCareer {
            career: labels[i].clone(),
            score: probability_to_score(clean[i]),
        })
        .collect()
}

/// Percent score, rounding exact halves to even (0.125 → 12, 0.375 → 38).
fn probability_to_score(probability: f64) -> u8 {
    (probability * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Generic hint shown for the fallback label instead of a computed gap.
pub fn fallback_missing_skills(career: &str) -> Vec<String> {
    let hint = match career {
        "Data Scientist" => "Deep Learning",
        "Software Engineer" => "System Design",
        "Business Analyst" => "Data Visualization",
        _ => "Industry-specific experience",
    };
    vec![hint.to_string()]
}
