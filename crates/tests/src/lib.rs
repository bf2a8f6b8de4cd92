//! # Integration Tests
//!
//! End-to-end tests across crate boundaries.
//!
//! Responsible for:
//! - Contract snapshot tests
//! - Config file -> pipeline -> HTTP ingress flows
//! - Shutdown behavior of in-flight dispatches

#[cfg(test)]
mod contract_tests {
    use contracts::{DestinationRef, ValidationError, WriteError};

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_error_messages_are_stable() {
        assert_eq!(WriteError::NilDestination.to_string(), "output is nil");
        assert_eq!(
            WriteError::UnknownDestination("files".into()).to_string(),
            "invalid output channel: files"
        );
        assert_eq!(ValidationError::EmptyPayload.kind(), "empty_payload");
        assert_eq!(DestinationRef::Absent.to_string(), "nil");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::AppConfig;
    use dispatcher::{Pipeline, SinkWriter};
    use http_api::{build_router, AppState};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn load(dir: &Path, extra: &str) -> AppConfig {
        let content = format!(
            r#"
http = "127.0.0.1:0"

[paths]
file_sink = "{file}"
dead_letter = "{dead}"

{extra}

[[conf]]
tag = "error"
outputs = ["file", "null"]

[[conf]]
tag = "info"
outputs = ["stdout"]
"#,
            file = dir.join("out/file.txt").display(),
            dead = dir.join("dlq.txt").display(),
        );
        ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap()
    }

    fn app(config: &AppConfig) -> (Router, Pipeline<SinkWriter>) {
        let pipeline = Pipeline::from_config(config).unwrap();
        let state = AppState::new(Arc::new(config.conf.clone()), pipeline.clone());
        (build_router(state), pipeline)
    }

    async fn post(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Config file -> Pipeline -> HTTP ingress -> file sink
    #[tokio::test]
    async fn test_e2e_delivery_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path(), "[retry]\nbackoff_ms = 10");
        let (app, pipeline) = app(&config);

        for data in ["first", "second"] {
            let (status, body) = post(app.clone(), json!({"tag": "error", "data": data})).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "OK");
        }

        let report = pipeline.shutdown().await;
        assert!(!report.cancelled);

        let content = fs::read_to_string(dir.path().join("out/file.txt")).unwrap();
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["first", "second"]);
        assert!(!dir.path().join("dlq.txt").exists());

        let metrics = pipeline.metrics();
        assert_eq!(metrics.dispatched, 2);
        assert_eq!(metrics.delivered, 4);
        assert_eq!(metrics.dead_lettered, 0);
    }

    /// A file sink that can never be opened ends in exactly one dead letter
    #[tokio::test]
    async fn test_e2e_permanent_failure_is_dead_lettered_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = load(dir.path(), "[retry]\nmax_attempts = 3\nbackoff_ms = 5");
        // A directory cannot be opened for append
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(&blocked).unwrap();
        config.paths.file_sink = blocked;
        let (app, pipeline) = app(&config);

        let (status, body) = post(app, json!({"tag": "error", "data": "x"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "OK"}));

        pipeline.shutdown().await;

        let dead = fs::read_to_string(dir.path().join("dlq.txt")).unwrap();
        assert_eq!(dead, "x\n");
        let metrics = pipeline.metrics();
        assert_eq!(metrics.failed_attempts, 3);
        assert_eq!(metrics.dead_lettered, 1);
        // The null destination in the same route still succeeded
        assert_eq!(metrics.delivered, 1);
        assert_eq!(pipeline.writer().null_sink().discarded(), 1);
    }

    /// Acknowledgment never waits for delivery
    #[tokio::test]
    async fn test_e2e_ack_before_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path(), "");
        let (app, pipeline) = app(&config);

        let (status, _) = tokio::time::timeout(
            Duration::from_secs(1),
            post(app, json!({"tag": "info", "data": "hello"})),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);

        pipeline.shutdown().await;
        assert_eq!(pipeline.metrics().delivered, 1);
    }

    /// Abandon cuts a long backoff short and dead-letters the payload
    #[tokio::test]
    async fn test_e2e_abandon_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = load(
            dir.path(),
            "[retry]\nmax_attempts = 5\nbackoff_ms = 60000\n\n[shutdown]\npolicy = \"abandon\"",
        );
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(&blocked).unwrap();
        config.paths.file_sink = blocked;
        let (app, pipeline) = app(&config);

        let (status, _) = post(app.clone(), json!({"tag": "error", "data": "pending"})).await;
        assert_eq!(status, StatusCode::OK);

        let report = tokio::time::timeout(Duration::from_secs(5), pipeline.shutdown())
            .await
            .unwrap();
        assert!(report.cancelled);

        let dead = fs::read_to_string(dir.path().join("dlq.txt")).unwrap();
        assert_eq!(dead, "pending\n");

        // Ingress after shutdown is still acknowledged and goes straight to the dead letters
        let (status, _) = post(app, json!({"tag": "info", "data": "late"})).await;
        assert_eq!(status, StatusCode::OK);
        pipeline.shutdown().await;
        let dead = fs::read_to_string(dir.path().join("dlq.txt")).unwrap();
        assert_eq!(dead, "pending\nlate\n");
    }

    /// Unknown destinations are rejected at load time unless strict mode is off
    #[test]
    fn test_e2e_strict_destinations() {
        let strict = r#"
[[conf]]
tag = "error"
outputs = ["files"]
"#;
        assert!(ConfigLoader::load_from_str(strict, ConfigFormat::Toml).is_err());

        let lenient = format!("strict_destinations = false\n{strict}");
        let config = ConfigLoader::load_from_str(&lenient, ConfigFormat::Toml).unwrap();
        assert_eq!(config.conf.len(), 1);
    }
}
