//! Policy DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ValidatePolicyRequest {
    #[validate(length(min = 1, max = 64, message = "policy number is required"))]
    pub policy_no: String,
}

#[derive(Debug, Serialize)]
pub struct ValidatePolicyResponse {
    pub policy_no: String,
    pub valid: bool,
}
