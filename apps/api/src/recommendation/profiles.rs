use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Required skills for one career, in declared order and canonical spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub career: String,
    pub required_skills: Vec<String>,
}

const BUILTIN_PROFILES: &[(&str, &[&str])] = &[
    (
        "Data Scientist",
        &["Python", "Machine Learning", "Statistics", "SQL", "Data Visualization", "Communication"],
    ),
    (
        "Software Engineer",
        &["Data Structures", "Algorithms", "System Design", "Git", "Testing", "Teamwork"],
    ),
    (
        "Business Analyst",
        &["Business Analysis", "Requirements Gathering", "SQL", "Excel", "Data Visualization", "Communication"],
    ),
    (
        "Data Analyst",
        &["SQL", "Excel", "Data Analysis", "Statistics", "Tableau", "Communication"],
    ),
    (
        "Web Developer",
        &["HTML", "CSS", "JavaScript", "React", "REST API", "Git"],
    ),
    (
        "DevOps Engineer",
        &["Linux", "Docker", "Kubernetes", "CI/CD", "AWS", "Terraform"],
    ),
    (
        "Machine Learning Engineer",
        &["Python", "Machine Learning", "Deep Learning", "PyTorch", "Docker", "System Design"],
    ),
    (
        "Cybersecurity Analyst",
        &["Network Security", "Linux", "Penetration Testing", "Python", "Communication"],
    ),
    (
        "Project Manager",
        &["Project Management", "Agile", "Scrum", "Stakeholder Management", "Leadership", "Communication"],
    ),
    (
        "UX Designer",
        &["UX Design", "UI Design", "Figma", "User Research", "Communication"],
    ),
];

/// Career label → required skills. Read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct CareerProfiles {
    profiles: HashMap<String, Vec<String>>,
}

impl CareerProfiles {
    pub fn builtin() -> Self {
        Self::from_profiles(BUILTIN_PROFILES.iter().map(|(career, skills)| CareerProfile {
            career: career.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
        }))
    }

    /// Builds the table; a repeated career label replaces the earlier profile.
    pub fn from_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = CareerProfile>,
    {
        let mut table = HashMap::new();
        for profile in profiles {
            if table
                .insert(profile.career.clone(), profile.required_skills)
                .is_some()
            {
                tracing::warn!(career = %profile.career, "Duplicate career profile; keeping the last one");
            }
        }
        Self { profiles: table }
    }

    /// Loads `[{"career": ..., "required_skills": [...]}]`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read career profiles {}", path.display()))?;
        let profiles: Vec<CareerProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed career profiles {}", path.display()))?;
        Ok(Self::from_profiles(profiles))
    }

    pub fn required_skills(&self, career: &str) -> Option<&[String]> {
        self.profiles.get(career).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_profiles_preserve_declared_order() {
        let profiles = CareerProfiles::builtin();
        let ds = profiles.required_skills("Data Scientist").unwrap();
        assert_eq!(ds.first().map(String::as_str), Some("Python"));
        assert_eq!(ds.last().map(String::as_str), Some("Communication"));
        assert_eq!(profiles.len(), BUILTIN_PROFILES.len());
    }

    #[test]
    fn test_unknown_career_has_no_profile() {
        assert!(CareerProfiles::builtin().required_skills("Astronaut").is_none());
    }

    #[test]
    fn test_duplicate_career_keeps_last() {
        let profiles = CareerProfiles::from_profiles(vec![
            CareerProfile {
                career: "Chef".into(),
                required_skills: vec!["Knife Skills".into()],
            },
            CareerProfile {
                career: "Chef".into(),
                required_skills: vec!["Menu Planning".into()],
            },
        ]);
        assert_eq!(profiles.required_skills("Chef").unwrap(), &["Menu Planning".to_string()]);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"career": "Game Developer", "required_skills": ["C++", "Unity", "Linear Algebra"]}}]"#
        )
        .unwrap();

        let profiles = CareerProfiles::from_json_file(file.path()).unwrap();
        assert_eq!(
            profiles.required_skills("Game Developer").unwrap(),
            &["C++".to_string(), "Unity".to_string(), "Linear Algebra".to_string()]
        );
    }

    #[test]
    fn test_malformed_json_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Game Developer": ["C++"]}}"#).unwrap();
        assert!(CareerProfiles::from_json_file(file.path()).is_err());
    }
}
