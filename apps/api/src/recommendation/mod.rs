// Career recommendation: classifier boundary, ranking, gap analysis and the
// HTTP handlers that expose the pipeline.

pub mod classifier;
pub mod gaps;
pub mod handlers;
pub mod linear_model;
pub mod profiles;
pub mod ranker;
