//! API tests against the router wired with stub ports

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
use domain_claims::StaticPolicyRegistry;
use interface_api::{create_router, AppState};
use test_utils::fixtures::{png_photo, recent_loss_date, future_loss_date, GIF_BYTES};
use test_utils::StubPorts;

const MAX_UPLOAD: usize = 1024 * 1024;

fn server_with(ports: &StubPorts) -> TestServer {
    let state = AppState::new(ports.orchestrator(), Arc::new(StaticPolicyRegistry::default()));
    TestServer::new(create_router(state, MAX_UPLOAD)).unwrap()
}

fn claim_form(photo: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", "Lena Fischer")
        .add_text("email", "lena@example.ch")
        .add_text("date_of_loss", recent_loss_date().format("%Y-%m-%d").to_string())
        .add_text("location", "8004")
        .add_part(
            "photo",
            Part::bytes(photo).file_name("damage.png").mime_type("image/png"),
        )
}

mod claims_tests {
    use super::*;

    #[tokio::test]
    async fn test_rain_claim_is_approved_and_paid() {
        let ports = StubPorts::approving(1500);
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["approved"], true);
        assert_eq!(body["refund_tx"], "re_mock_1");
        assert_eq!(body["category"], "rain_damage");
        assert_eq!(body["corroboration"], "corroborated");
        assert_eq!(body["trace"].as_array().unwrap().len(), 6);
        assert!(body["message"].as_str().unwrap().contains("re_mock_1"));

        let records = ports.audit.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.claimant_email, "lena@example.ch");
    }

    #[tokio::test]
    async fn test_fire_claim_is_denied() {
        let ports = StubPorts::denying();
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["approved"], false);
        assert_eq!(body["reason"], "No matching weather event found");
        assert!(body.get("refund_tx").is_none());
        assert_eq!(ports.refunds.attempts(), 0);
    }

    #[tokio::test]
    async fn test_refund_failure_returns_bad_gateway_with_record_id() {
        let ports = StubPorts::failing_refund();
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"], "upstream_failure");
        assert_eq!(body["stage"], "refund");
        assert!(body["record_id"].is_string());

        let records = ports.audit.records().await;
        assert_eq!(records.len(), 1);
        assert!(records[0].1.decision.approved);
        assert!(records[0].1.refund_tx.is_none());
    }

    #[tokio::test]
    async fn test_classifier_outage_stores_nothing() {
        let ports = StubPorts::classifier_down();
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["stage"], "classification");
        assert!(body.get("record_id").is_none());
        assert!(ports.audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_unsupported_photo_is_rejected() {
        let ports = StubPorts::approving(1000);
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(GIF_BYTES.to_vec()))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(ports.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_future_date_is_rejected() {
        let ports = StubPorts::approving(1000);
        let server = server_with(&ports);
        let form = MultipartForm::new()
            .add_text("name", "Lena Fischer")
            .add_text("email", "lena@example.ch")
            .add_text("date_of_loss", future_loss_date().format("%Y-%m-%d").to_string())
            .add_text("location", "8004")
            .add_part("photo", Part::bytes(png_photo()).file_name("d.png"));

        let response = server.post("/api/v1/claims").multipart(form).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(ports.audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_policy_is_rejected_before_pipeline() {
        let ports = StubPorts::approving(1000);
        let server = server_with(&ports);

        let response = server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()).add_text("policy_no", "NOPE-1"))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "unknown_policy");
        assert_eq!(ports.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_known_policy_is_recorded() {
        let ports = StubPorts::approving(1000);
        let server = server_with(&ports);

        server
            .post("/api/v1/claims")
            .multipart(claim_form(png_photo()).add_text("policy_no", "demo-12345"))
            .await
            .assert_status_ok();

        let records = ports.audit.records().await;
        assert_eq!(records[0].1.policy_no.as_deref(), Some("demo-12345"));
    }
}

mod policy_tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_known_policy() {
        let server = server_with(&StubPorts::denying());

        let response = server
            .post("/api/v1/policies/validate")
            .json(&json!({"policy_no": " demo-678910 "}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"policy_no": "DEMO-678910", "valid": true}));
    }

    #[tokio::test]
    async fn test_validate_unknown_policy() {
        let server = server_with(&StubPorts::denying());

        let response = server
            .post("/api/v1/policies/validate")
            .json(&json!({"policy_no": "POL-0"}))
            .await;

        let body: Value = response.json();
        assert_eq!(body["valid"], false);
    }

    #[tokio::test]
    async fn test_empty_policy_number_is_rejected() {
        let server = server_with(&StubPorts::denying());

        server
            .post("/api/v1/policies/validate")
            .json(&json!({"policy_no": ""}))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod health_tests {
    use super::*;

    struct FixedHealth(AdapterHealth);

    #[async_trait]
    impl HealthCheckable for FixedHealth {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("fixed", self.0, 0)
        }
    }

    fn server_with_check(status: AdapterHealth) -> TestServer {
        let ports = StubPorts::denying();
        let state = AppState::new(ports.orchestrator(), Arc::new(StaticPolicyRegistry::default()))
            .with_readiness_check(Arc::new(FixedHealth(status)));
        TestServer::new(create_router(state, MAX_UPLOAD)).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let server = server_with(&StubPorts::denying());
        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_when_adapters_healthy() {
        let response = server_with_check(AdapterHealth::Healthy).get("/health/ready").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"][0]["adapter_id"], "fixed");
    }

    #[tokio::test]
    async fn test_not_ready_when_adapter_unhealthy() {
        server_with_check(AdapterHealth::Unhealthy)
            .get("/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_cross_origin_requests_get_cors_and_request_id_headers() {
        let server = server_with(&StubPorts::denying());
        let response = server
            .get("/health")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://claims.example.ch"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let server = server_with(&StubPorts::denying());
        let response = server.get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
