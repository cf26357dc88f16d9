//! API error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::ClaimRecordId;
use domain_claims::{ClaimError, PipelineStage, RefundTransactionId};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown policy number: {0}")]
    UnknownPolicy(String),

    /// A collaborator of the claim pipeline failed
    #[error("{stage} failed")]
    Upstream {
        stage: PipelineStage,
        record_id: Option<ClaimRecordId>,
        refund_tx: Option<RefundTransactionId>,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStage>,
    /// Audit record left behind by a partial failure, for reconciliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<ClaimRecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_tx: Option<RefundTransactionId>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
            stage: None,
            record_id: None,
            refund_tx: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new("bad_request", msg)),
            ApiError::Validation(problems) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    details: Some(problems),
                    ..ErrorResponse::new("validation_error", "The claim submission is invalid")
                },
            ),
            ApiError::UnknownPolicy(policy_no) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("unknown_policy", format!("Policy number {} is not known", policy_no)),
            ),
            ApiError::Upstream { stage, record_id, refund_tx } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    stage: Some(stage),
                    record_id,
                    refund_tx,
                    ..ErrorResponse::new(
                        "upstream_failure",
                        format!("{} failed; the claim could not be completed", stage),
                    )
                },
            ),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("service_unavailable", msg),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("internal_error", msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(problems) => ApiError::Validation(problems),
            ClaimError::PolicyNotFound(policy_no) => ApiError::UnknownPolicy(policy_no),
            ClaimError::PolicyLookup(source) => {
                error!(error = %source, "Policy lookup failed");
                ApiError::Unavailable("Policy lookup is unavailable".to_string())
            }
            ClaimError::AuditUpdate { record_id, refund_tx, source } => {
                error!(
                    record_id = %record_id,
                    refund_tx = %refund_tx,
                    error = %source,
                    "Refund issued but not recorded"
                );
                ApiError::Upstream {
                    stage: PipelineStage::AuditUpdate,
                    record_id: Some(record_id),
                    refund_tx: Some(refund_tx),
                }
            }
            other => match other.stage() {
                Some(stage) => {
                    error!(stage = ?stage, error = %other, "Claim pipeline failed");
                    ApiError::Upstream {
                        stage,
                        record_id: other.record_id(),
                        refund_tx: None,
                    }
                }
                None => ApiError::Internal(other.to_string()),
            },
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;

    #[test]
    fn test_validation_maps_to_422() {
        let response = ApiError::from(ClaimError::Validation(vec!["no photo uploaded".into()]))
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_refund_failure_keeps_record_id() {
        let record_id = ClaimRecordId::new_v7();
        let err = ApiError::from(ClaimError::Refund {
            record_id,
            source: PortError::service_unavailable("stripe"),
        });
        match err {
            ApiError::Upstream { stage, record_id: Some(id), refund_tx: None } => {
                assert_eq!(stage, PipelineStage::Refund);
                assert_eq!(id, record_id);
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_classification_failure_is_bad_gateway() {
        let response = ApiError::from(ClaimError::Classification(PortError::service_unavailable(
            "damage-classifier",
        )))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
