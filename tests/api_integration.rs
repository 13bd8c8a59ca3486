//! Router-level tests for the dashboard API, using the in-memory cloud
//! provider so every upstream outcome can be scripted.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use omics_dashboard::cloud::MockCloud;
use omics_dashboard::server::build_router;
use omics_dashboard::{AppState, DashboardConfig};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> DashboardConfig {
    DashboardConfig {
        region: "us-east-1".to_string(),
        bucket: "test-bucket".to_string(),
        profile: "default".to_string(),
        stack_name: "test-stack".to_string(),
    }
}

fn app_with(cloud: MockCloud) -> Router {
    build_router(AppState::new(test_config(), Arc::new(cloud)))
}

async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(app: Router, path: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn config_returns_all_fields_and_real_mode() {
    let (status, body) = get(app_with(MockCloud::new()), "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "us-east-1");
    assert_eq!(body["bucket"], "test-bucket");
    assert_eq!(body["profile"], "default");
    assert_eq!(body["stackName"], "test-stack");
    assert_eq!(body["simulation"], false);
}

#[tokio::test]
async fn health_reports_healthy_with_parseable_timestamp() {
    let (status, body) = get(app_with(MockCloud::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp parses");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn status_is_ready_on_an_empty_queue() {
    let cloud = MockCloud::new().with_counts(0, 0, 0);
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "READY");
    assert_eq!(body["completedSamples"], 0);
    assert_eq!(body["totalSamples"], 100);
    assert_eq!(body["costAccrued"], 0.0);
}

#[tokio::test]
async fn status_reports_running_with_succeeded_count() {
    let cloud = MockCloud::new().with_counts(2, 5, 0);
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "RUNNING");
    assert_eq!(body["completedSamples"], 5);
}

#[tokio::test]
async fn status_is_not_found_without_a_queue() {
    let cloud = MockCloud::new().without_queue();
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "NOT_FOUND");
    assert_eq!(body["message"], "Job queue not found");
}

#[tokio::test]
async fn failed_queue_describe_also_maps_to_not_found() {
    let cloud = MockCloud::new().with_failing_queue_query();
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "NOT_FOUND");
}

#[tokio::test]
async fn failed_job_count_query_is_a_server_error() {
    let cloud = MockCloud::new().with_failing_count_query();
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], "AWS Batch call failed: list_jobs failed");
}

#[tokio::test]
async fn status_is_error_when_batch_client_is_unavailable() {
    let cloud = MockCloud::new().without_batch();
    let (status, body) = get(app_with(cloud), "/api/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], "AWS Batch client not available");
}

#[tokio::test]
async fn resources_serves_a_simulated_sample() {
    let (status, body) = get(app_with(MockCloud::new()), "/api/resources").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["cpuCount"].as_i64().is_some());
    let time = body["time"].as_f64().unwrap();
    assert!((0.0..15.0).contains(&time));
    assert!(body["cpuUtilization"].as_f64().unwrap() >= 70.0);
}

#[tokio::test]
async fn resources_requires_the_metrics_client() {
    let cloud = MockCloud::new().without_metrics();
    let (status, body) = get(app_with(cloud), "/api/resources").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "CloudWatch client not available");
}

#[tokio::test]
async fn stats_serves_the_stored_object_when_present() {
    let stored = serde_json::json!({
        "totalVariants": 10,
        "transitions": 7,
        "transversions": 3,
        "tiTvRatio": 2.333
    });
    let cloud = MockCloud::new().with_object(
        "test-bucket",
        "results/stats/stats.json",
        stored.to_string().as_bytes(),
    );
    let (status, body) = get(app_with(cloud), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalVariants"], 10);
    assert_eq!(body["transitions"], 7);
}

#[tokio::test]
async fn stats_falls_back_to_demo_constants() {
    // No object stored: the read fails and the fixed figures are served.
    let (status, body) = get(app_with(MockCloud::new()), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalVariants"], 243826);
    assert_eq!(body["transitions"], 167538);
    assert_eq!(body["transversions"], 76288);

    let transitions = body["transitions"].as_u64().unwrap();
    let transversions = body["transversions"].as_u64().unwrap();
    assert_eq!(transitions + transversions, body["totalVariants"].as_u64().unwrap());
    let ratio = transitions as f64 / transversions as f64;
    assert!((ratio - body["tiTvRatio"].as_f64().unwrap()).abs() < 0.001);
}

#[tokio::test]
async fn stats_requires_the_object_store_client() {
    let cloud = MockCloud::new().without_object_store();
    let (status, body) = get(app_with(cloud), "/api/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "S3 client not available");
}

#[tokio::test]
async fn start_submits_a_job_with_stack_derived_names() {
    let cloud = MockCloud::new();
    let app = app_with(cloud.clone());
    let (status, body) = post_json(app, "/api/start", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["jobId"], "mock-job-1");
    assert_eq!(body["message"], "Demo started successfully");

    let submitted = cloud.submitted_jobs();
    assert_eq!(submitted.len(), 1);
    let spec = &submitted[0];
    assert!(spec.name.starts_with("omics-demo-"));
    assert_eq!(spec.queue, "test-stack-queue");
    assert_eq!(spec.definition, "test-stack-job-def");
    assert!(spec
        .environment
        .contains(&("BUCKET_NAME".to_string(), "test-bucket".to_string())));
    assert!(spec
        .environment
        .contains(&("REGION".to_string(), "us-east-1".to_string())));
}

#[tokio::test]
async fn start_with_empty_schema_accepts_any_body() {
    // The declared start schema has no fields, so even a malformed body
    // passes the guard (mirrors the original decorator's behavior).
    let app = app_with(MockCloud::new());
    let (status, body) = post_json(app, "/api/start", Body::from("not json at all")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn start_reports_batch_unavailability() {
    let cloud = MockCloud::new().without_batch();
    let (status, body) = post_json(app_with(cloud), "/api/start", Body::empty()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AWS Batch client not available");
}

mod guarded_routes {
    //! Exercises the validation middleware through a route with a
    //! non-empty schema, since the shipped start schema declares none.

    use super::*;
    use axum::routing::post;
    use axum::{middleware, Json};
    use omics_dashboard::validate::{
        enforce_schema, is_non_empty_string, is_positive_int, Constraint, Schema,
    };
    use std::sync::LazyLock;

    static SUBSET_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new()
            .field(
                "samples",
                Constraint::Predicate {
                    name: "positive integer",
                    check: is_positive_int,
                },
            )
            .field(
                "label",
                Constraint::Predicate {
                    name: "non-empty string",
                    check: is_non_empty_string,
                },
            )
    });

    fn guarded_app() -> Router {
        Router::new().route(
            "/subset",
            post(|| async { Json(serde_json::json!({ "ok": true })) }).route_layer(
                middleware::from_fn(|req, next| enforce_schema(&SUBSET_SCHEMA, req, next)),
            ),
        )
    }

    #[tokio::test]
    async fn missing_body_is_rejected() {
        let (status, body) = post_json(guarded_app(), "/subset", Body::empty()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing JSON in request");
    }

    #[tokio::test]
    async fn null_body_is_rejected_as_missing() {
        let (status, body) = post_json(guarded_app(), "/subset", Body::from("null")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing JSON in request");
    }

    #[tokio::test]
    async fn first_bad_field_is_named() {
        let payload = serde_json::json!({ "samples": -1, "label": "chr20" });
        let (status, body) =
            post_json(guarded_app(), "/subset", Body::from(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid value for field: samples");
    }

    #[tokio::test]
    async fn valid_payload_reaches_the_handler() {
        let payload = serde_json::json!({ "samples": 25, "label": "chr20" });
        let (status, body) =
            post_json(guarded_app(), "/subset", Body::from(payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }
}
