pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::recommend::handlers as recommend;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations
        .route(
            "/api/v1/freelancers/:id/recommended-jobs",
            get(recommend::handle_recommended_jobs),
        )
        .route(
            "/api/v1/jobs/:id/recommended-freelancers",
            get(recommend::handle_recommended_freelancers),
        )
        // Resume skill extraction
        .route("/api/v1/resume/skills", post(resume::handle_extract_skills))
        .route(
            "/api/v1/freelancers/:id/resume",
            post(resume::handle_attach_resume),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::resume::pipeline::fakes::CannedGenerator;
    use crate::resume::retriever::fakes::KeywordEmbedder;
    use crate::store::memory::{make_job, make_student, InMemoryStore};

    const BOUNDARY: &str = "gighubtestboundary";

    fn state_with(store: InMemoryStore) -> AppState {
        AppState {
            store: Arc::new(store),
            generator: Arc::new(CannedGenerator::new(r#"{"skills": ["Rust"]}"#)),
            embedder: Arc::new(KeywordEmbedder {
                vocabulary: vec!["skills"],
            }),
            config: Config::default(),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn multipart_request(uri: &str, field: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state_with(InMemoryStore::default()));
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "gighub-api");
    }

    #[tokio::test]
    async fn test_recommended_jobs_endpoint() {
        let student = make_student("Asha", &["Rust"], None);
        let id = student.id;
        let store = InMemoryStore::new(
            vec![student],
            vec![
                make_job("Figma mockups", &["Figma"], None, "Design screens"),
                make_job("Rust CLI", &["Rust"], None, "Write a Rust tool"),
            ],
        );
        let app = build_router(state_with(store));

        let uri = format!("/api/v1/freelancers/{id}/recommended-jobs?top_n=1");
        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["freelancer"]["name"], "Asha");
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["title"], "Rust CLI");
        assert_eq!(recs[0]["pay"]["type"], "fixed");
    }

    #[tokio::test]
    async fn test_recommended_freelancers_endpoint() {
        let job = make_job("Rust CLI", &["Rust"], None, "");
        let job_id = job.id;
        let store = InMemoryStore::new(
            vec![
                make_student("Ben", &["Figma"], None),
                make_student("Asha", &["Rust"], None),
            ],
            vec![job],
        );
        let app = build_router(state_with(store));

        let uri = format!("/api/v1/jobs/{job_id}/recommended-freelancers");
        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"][0]["name"], "Asha");
        assert_eq!(body["recommendations"][0]["skills"][0], "Rust");
    }

    #[tokio::test]
    async fn test_invalid_job_id_is_bad_request() {
        let app = build_router(state_with(InMemoryStore::default()));
        let (status, body) = send(
            app,
            get_request("/api/v1/jobs/not-an-id/recommended-freelancers"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid job ID format");
    }

    #[tokio::test]
    async fn test_out_of_range_top_n_is_bad_request() {
        let id = uuid::Uuid::new_v4();
        let app = build_router(state_with(InMemoryStore::default()));
        let uri = format!("/api/v1/freelancers/{id}/recommended-jobs?top_n=0");
        let (status, _) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_job_is_not_found() {
        let id = uuid::Uuid::new_v4();
        let store = InMemoryStore::new(vec![make_student("Asha", &["Rust"], None)], vec![]);
        let app = build_router(state_with(store));
        let uri = format!("/api/v1/jobs/{id}/recommended-freelancers");
        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job not found");
    }

    #[tokio::test]
    async fn test_resume_upload_without_file_field() {
        let app = build_router(state_with(InMemoryStore::default()));
        let request = multipart_request("/api/v1/resume/skills", "document", b"%PDF-1.4");
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("resume"));
    }

    #[tokio::test]
    async fn test_resume_upload_rejects_non_pdf() {
        let app = build_router(state_with(InMemoryStore::default()));
        let request = multipart_request("/api/v1/resume/skills", "resume", b"just some text");
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "uploaded file is not a PDF");
    }

    #[tokio::test]
    async fn test_attach_resume_unknown_freelancer() {
        let id = uuid::Uuid::new_v4();
        let app = build_router(state_with(InMemoryStore::default()));
        let uri = format!("/api/v1/freelancers/{id}/resume");
        let request = multipart_request(&uri, "resume", b"%PDF-1.4");
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_top_n_is_json_validation_error() {
        let id = uuid::Uuid::new_v4();
        let app = build_router(state_with(InMemoryStore::default()));
        let uri = format!("/api/v1/freelancers/{id}/recommended-jobs?top_n=abc");
        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("query string"));
    }

    #[tokio::test]
    async fn test_non_multipart_upload_is_json_validation_error() {
        let app = build_router(state_with(InMemoryStore::default()));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resume/skills")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"resume": "x"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_attach_resume_endpoint_stores_skills() {
        use crate::resume::pdf::RESUME_FIXTURE;

        let student = make_student("Asha", &["Rust"], None);
        let id = student.id;
        let store = Arc::new(InMemoryStore::new(vec![student], vec![]));
        let state = AppState {
            store: store.clone(),
            ..state_with(InMemoryStore::default())
        };
        let app = build_router(state);

        let uri = format!("/api/v1/freelancers/{id}/resume");
        let (status, body) = send(app, multipart_request(&uri, "resume", RESUME_FIXTURE)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"][0], "Rust");
        assert_eq!(store.students.lock().unwrap()[0].resume_skills, vec!["Rust"]);
    }
}
