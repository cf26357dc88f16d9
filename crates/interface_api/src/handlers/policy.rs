//! Policy handlers

use axum::{extract::State, Json};
use validator::Validate;

use domain_claims::policy::normalize_policy_no;
use domain_claims::ClaimError;

use crate::dto::policy::{ValidatePolicyRequest, ValidatePolicyResponse};
use crate::{error::ApiError, AppState};

/// Checks whether a policy number is known
pub async fn validate_policy(
    State(state): State<AppState>,
    Json(request): Json<ValidatePolicyRequest>,
) -> Result<Json<ValidatePolicyResponse>, ApiError> {
    request.validate().map_err(|errors| {
        ApiError::Validation(
            errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect(),
        )
    })?;

    let valid = state
        .policies
        .is_valid(&request.policy_no)
        .await
        .map_err(ClaimError::PolicyLookup)?;

    Ok(Json(ValidatePolicyResponse {
        policy_no: normalize_policy_no(&request.policy_no),
        valid,
    }))
}
