use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    /// Built-in career profiles are used when unset.
    pub career_profiles_path: Option<PathBuf>,
    /// Built-in recognition dictionary is used when unset.
    pub skill_dictionary_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            model_path: env_or("MODEL_PATH", "models/career_classifier.json").into(),
            vectorizer_path: env_or("VECTORIZER_PATH", "models/vectorizer.json").into(),
            career_profiles_path: optional_env("CAREER_PROFILES_PATH").map(PathBuf::from),
            skill_dictionary_path: optional_env("SKILL_DICTIONARY_PATH").map(PathBuf::from),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
