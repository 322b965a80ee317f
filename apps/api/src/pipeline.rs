//! Pipeline context — the immutable, process-wide resources (dictionary, profiles,
//! model) and the request-level flow over them:
//! text → skills → ranked careers → gaps.

use serde::Serialize;

use crate::errors::AppError;
use crate::recommendation::classifier::ModelBundle;
use crate::recommendation::gaps::gaps;
use crate::recommendation::profiles::CareerProfiles;
use crate::recommendation::ranker::{fallback_missing_skills, rank, RankingMode};
use crate::skills::{recognize, RecognitionDictionary, SkillSet};

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub career: String,
    pub score: u8,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub skills: SkillSet,
    pub ranking_mode: RankingMode,
    pub recommendations: Vec<Recommendation>,
}

/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub dictionary: RecognitionDictionary,
    pub profiles: CareerProfiles,
    /// `None` when the model artifacts failed to load.
    pub model: Option<ModelBundle>,
}

impl PipelineContext {
    pub fn new(
        dictionary: RecognitionDictionary,
        profiles: CareerProfiles,
        model: Option<ModelBundle>,
    ) -> Self {
        Self {
            dictionary,
            profiles,
            model,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Fails with `ModelUnavailable` when no model is loaded.
    pub fn require_model(&self) -> Result<&ModelBundle, AppError> {
        self.model.as_ref().ok_or(AppError::ModelUnavailable)
    }

    pub fn analyze(&self, text: &str) -> SkillSet {
        recognize(text, &self.dictionary)
    }

    /// Full recommendation: recognize, rank, then annotate gaps.
    pub fn recommend(&self, text: &str) -> Result<RecommendationReport, AppError> {
        let model = self.require_model()?;

        let skills = self.analyze(text);
        if skills.is_empty() {
            tracing::debug!("No skills recognized; ranking on empty feature text");
        }
        let ranking = rank(&skills, Some(model))?;

        let recommendations = ranking
            .careers
            .into_iter()
            .map(|ranked| {
                let missing_skills = match ranking.mode {
                    RankingMode::Probabilistic => {
                        gaps(&ranked.career, &skills, ranked.score, &self.profiles)
                    }
                    RankingMode::Fallback => fallback_missing_skills(&ranked.career),
                };
                Recommendation {
                    career: ranked.career,
                    score: ranked.score,
                    missing_skills,
                }
            })
            .collect();

        tracing::debug!(
            skills = skills.len(),
            mode = ?ranking.mode,
            "Built career recommendations"
        );

        Ok(RecommendationReport {
            skills,
            ranking_mode: ranking.mode,
            recommendations,
        })
    }

    /// Single-label prediction over the raw text rather than the skill list.
    pub fn predict_career(&self, text: &str) -> Result<String, AppError> {
        let model = self.require_model()?;
        let features = model.vectorizer.transform(text);
        model
            .classifier
            .predict(&features)
            .map_err(|e| AppError::Classifier(e.to_string()))
    }
}
