mod config;
mod errors;
mod extraction;
mod pipeline;
mod recommendation;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pipeline::PipelineContext;
use crate::recommendation::classifier::ModelBundle;
use crate::recommendation::linear_model::load_bundle;
use crate::recommendation::profiles::CareerProfiles;
use crate::routes::build_router;
use crate::skills::RecognitionDictionary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    let dictionary = match &config.skill_dictionary_path {
        Some(path) => RecognitionDictionary::from_json_file(path)?,
        None => RecognitionDictionary::builtin(),
    };
    info!("Skill dictionary loaded ({} phrases)", dictionary.len());

    let profiles = match &config.career_profiles_path {
        Some(path) => CareerProfiles::from_json_file(path)?,
        None => CareerProfiles::builtin(),
    };
    info!("Career profiles loaded ({} careers)", profiles.len());

    let model = load_model(&config);

    let state = AppState {
        pipeline: Arc::new(PipelineContext::new(dictionary, profiles, model)),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A missing or broken model is not fatal: the service still extracts skills,
/// and every ranking request answers `ModelUnavailable`.
fn load_model(config: &Config) -> Option<ModelBundle> {
    match load_bundle(&config.model_path, &config.vectorizer_path) {
        Ok(bundle) => {
            info!(
                "Career model loaded ({} labels) from {}",
                bundle.classifier.labels().len(),
                config.model_path.display()
            );
            Some(bundle)
        }
        Err(e) => {
            warn!("Career model not loaded, ranking disabled: {e:#}");
            None
        }
    }
}
