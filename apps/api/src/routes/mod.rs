pub mod health;
pub mod index;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", post(handlers::handle_extract_skills))
        .route("/api/v1/recommendations", post(handlers::handle_recommend))
        // Single-label endpoint kept for existing clients
        .route("/predict", post(handlers::handle_predict))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::pipeline::PipelineContext;
    use crate::recommendation::classifier::testing::{bundle, StubClassifier};
    use crate::recommendation::classifier::ModelBundle;
    use crate::recommendation::profiles::CareerProfiles;
    use crate::skills::RecognitionDictionary;

    const LABELS: &[&str] = &["Business Analyst", "Data Scientist", "Software Engineer"];

    fn server(model: Option<ModelBundle>) -> TestServer {
        let pipeline = PipelineContext::new(
            RecognitionDictionary::builtin(),
            CareerProfiles::builtin(),
            model,
        );
        let state = AppState {
            pipeline: Arc::new(pipeline),
        };
        TestServer::new(build_router(state)).unwrap()
    }

    fn server_with_distribution(probabilities: &[f64]) -> TestServer {
        let (model, _) = bundle(StubClassifier::with_distribution(LABELS, probabilities));
        server(Some(model))
    }

    fn error_code(body: &Value) -> &str {
        body["error"]["code"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let response = server(None).get("/health").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillmatch-api");
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_index_serves_prediction_form() {
        let response = server(None).get("/").await;
        response.assert_status_ok();
        assert!(response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let page = response.text();
        assert!(page.contains("<form"));
        assert!(page.contains("/predict"));
    }

    #[tokio::test]
    async fn test_skills_from_json_text() {
        let response = server(None)
            .post("/api/v1/skills")
            .json(&json!({"text": "I know Python, SQL, and have done Machine Learning projects"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let skills: Vec<&str> = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(skills.contains(&"python"));
        assert!(skills.contains(&"sql"));
        assert!(skills.contains(&"machine learning"));
    }

    #[tokio::test]
    async fn test_skills_from_uploaded_text_file() {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"Docker and Kubernetes on AWS".to_vec())
                .file_name("resume.txt")
                .mime_type("text/plain"),
        );
        let response = server(None).post("/api/v1/skills").multipart(form).await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let skills = body["skills"].as_array().unwrap();
        assert!(skills.contains(&json!("docker")));
        assert!(skills.contains(&json!("kubernetes")));
        assert!(skills.contains(&json!("aws")));
    }

    #[tokio::test]
    async fn test_multipart_text_field_is_accepted() {
        let form = MultipartForm::new().add_text("text", "Scrum and Agile leadership");
        let response = server(None).post("/api/v1/skills").multipart(form).await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["skills"].as_array().unwrap().contains(&json!("scrum")));
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"%PDF-1.7".to_vec()).file_name("resume.exe"),
        );
        let response = server(None).post("/api/v1/skills").multipart(form).await;
        assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(error_code(&response.json::<Value>()), "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_zero_byte_pdf_is_corrupt() {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(Vec::new()).file_name("resume.pdf").mime_type("application/pdf"),
        );
        let response = server(None).post("/api/v1/skills").multipart(form).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(&response.json::<Value>()), "CORRUPT_DOCUMENT");
    }

    #[tokio::test]
    async fn test_invalid_utf8_text_file_is_corrupt() {
        let form = MultipartForm::new()
            .add_part("file", Part::bytes(vec![0xc3, 0x28, 0xff]).file_name("notes.txt"));
        let response = server(None).post("/api/v1/skills").multipart(form).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_input_is_bad_request() {
        let response = server(None).post("/api/v1/skills").json(&json!({})).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response.json::<Value>()), "NO_INPUT_PROVIDED");

        let response = server(None).post("/api/v1/skills").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendations_without_model_unavailable() {
        let response = server(None)
            .post("/api/v1/recommendations")
            .json(&json!({"text": "Python"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let body = response.json::<Value>();
        assert_eq!(error_code(&body), "MODEL_UNAVAILABLE");
        assert!(body.get("recommendations").is_none());
    }

    #[tokio::test]
    async fn test_model_check_precedes_document_parsing() {
        let form = MultipartForm::new()
            .add_part("file", Part::bytes(Vec::new()).file_name("resume.pdf"));
        let response = server(None)
            .post("/api/v1/recommendations")
            .multipart(form)
            .await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_recommendations_probabilistic() {
        let response = server_with_distribution(&[0.2, 0.7, 0.1])
            .post("/api/v1/recommendations")
            .json(&json!({"text": "I know Python, SQL, and have done Machine Learning projects"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["ranking_mode"], "probabilistic");

        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0]["career"], "Data Scientist");
        assert_eq!(recs[0]["score"], 70);
        assert!(recs[0]["missing_skills"]
            .as_array()
            .unwrap()
            .contains(&json!("Communication")));

        let scores: Vec<u64> = recs.iter().filter_map(|r| r["score"].as_u64()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_recommendations_fallback_is_labelled() {
        let (model, _) = bundle(StubClassifier::label_only(LABELS, "Business Analyst"));
        let response = server(Some(model))
            .post("/api/v1/recommendations")
            .json(&json!({"text": "Excel and SQL reporting"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["ranking_mode"], "fallback");
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["recommendations"][0]["missing_skills"],
            json!(["Data Visualization"])
        );
    }

    #[tokio::test]
    async fn test_predict_returns_single_label() {
        let (model, _) = bundle(StubClassifier::label_only(LABELS, "Software Engineer"));
        let response = server(Some(model))
            .post("/predict")
            .json(&json!({"text": "Rust, algorithms and system design"}))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"predicted_career": "Software Engineer"})
        );
    }

    #[tokio::test]
    async fn test_predict_without_model_unavailable() {
        let response = server(None)
            .post("/predict")
            .json(&json!({"text": "anything"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
