//! Gap Analyzer — which required skills of a career are missing from the input.

use crate::recommendation::profiles::CareerProfiles;
use crate::skills::SkillSet;

/// At or above this score a match is reported with no actionable gap.
pub const HIGH_CONFIDENCE_SCORE: u8 = 90;

/// Required skills for `career` absent from `skills`, in profile order and
/// canonical spelling. Matching follows `SkillSet::contains`, so
/// "ci/cd" covers "CI/CD". Empty means "good fit": a high-confidence score, an
/// unknown career, or full coverage.
pub fn gaps(career: &str, skills: &SkillSet, score: u8, profiles: &CareerProfiles) -> Vec<String> {
    if score >= HIGH_CONFIDENCE_SCORE {
        return Vec::new();
    }

    let Some(required) = profiles.required_skills(career) else {
        tracing::debug!(%career, "No career profile; reporting no gaps");
        return Vec::new();
    };

    required
        .iter()
        .filter(|skill| !skills.contains(skill))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::profiles::CareerProfile;
    use crate::skills::{recognize, RecognitionDictionary};

    fn ds_profiles() -> CareerProfiles {
        CareerProfiles::from_profiles(vec![CareerProfile {
            career: "Data Scientist".into(),
            required_skills: vec![
                "Python".into(),
                "Machine Learning".into(),
                "Statistics".into(),
                "SQL".into(),
                "Communication".into(),
            ],
        }])
    }

    fn sentence_skills() -> SkillSet {
        recognize(
            "I know Python, SQL, and have done Machine Learning projects",
            &RecognitionDictionary::builtin(),
        )
    }

    #[test]
    fn test_high_confidence_reports_no_gap() {
        assert!(gaps("Data Scientist", &sentence_skills(), 95, &ds_profiles()).is_empty());
        assert!(gaps("Data Scientist", &SkillSet::new(), 90, &ds_profiles()).is_empty());
    }

    #[test]
    fn test_missing_skills_in_profile_order() {
        let missing = gaps("Data Scientist", &sentence_skills(), 70, &ds_profiles());
        assert_eq!(missing, vec!["Statistics".to_string(), "Communication".to_string()]);
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_canonical_spelling() {
        let skills: SkillSet = ["PYTHON", "machine learning", "statistics", "sql"]
            .into_iter()
            .collect();
        assert_eq!(
            gaps("Data Scientist", &skills, 40, &ds_profiles()),
            vec!["Communication".to_string()]
        );
    }

    #[test]
    fn test_punctuated_skill_covers_profile_requirement() {
        let skills = recognize(
            "Linux, Docker, Kubernetes, CI/CD, AWS, Terraform",
            &RecognitionDictionary::builtin(),
        );
        assert!(skills.iter().any(|s| s == "ci/cd"));
        assert!(gaps("DevOps Engineer", &skills, 50, &CareerProfiles::builtin()).is_empty());
    }

    #[test]
    fn test_spelling_variants_of_a_skill_match() {
        let skills: SkillSet = ["ci-cd", "node js"].into_iter().collect();
        let profiles = CareerProfiles::from_profiles(vec![CareerProfile {
            career: "Platform Engineer".into(),
            required_skills: vec!["CI/CD".into(), "Node.js".into(), "Go".into()],
        }]);
        assert_eq!(
            gaps("Platform Engineer", &skills, 30, &profiles),
            vec!["Go".to_string()]
        );
    }

    #[test]
    fn test_unknown_career_is_empty_not_error() {
        assert!(gaps("Astronaut", &SkillSet::new(), 10, &ds_profiles()).is_empty());
    }

    #[test]
    fn test_full_coverage_is_empty() {
        let skills: SkillSet = ["python", "machine learning", "statistics", "sql", "communication"]
            .into_iter()
            .collect();
        assert!(gaps("Data Scientist", &skills, 60, &ds_profiles()).is_empty());
    }

    #[test]
    fn test_empty_skill_set_lists_every_requirement() {
        let missing = gaps("Data Scientist", &SkillSet::new(), 0, &ds_profiles());
        assert_eq!(missing.len(), 5);
        assert_eq!(missing[0], "Python");
    }
}
