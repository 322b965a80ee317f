use std::sync::Arc;

use crate::pipeline::PipelineContext;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Dictionary, career profiles and model, loaded once at startup. Read-only.
    pub pipeline: Arc<PipelineContext>,
}
