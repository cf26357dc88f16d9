//! Claims handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use domain_claims::policy::ensure_known_policy;

use crate::dto::claims::{ClaimForm, ClaimOutcomeResponse};
use crate::{error::ApiError, AppState};

/// Submits a claim and runs it through the automated pipeline
///
/// Approved and denied claims both answer 200; the body says which.
pub async fn submit_claim(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ClaimOutcomeResponse>, ApiError> {
    let submission = ClaimForm::from_multipart(multipart).await?.into_submission()?;

    ensure_known_policy(state.policies.as_ref(), submission.policy_no.as_deref()).await?;

    // One claim at a time through the pipeline
    let _guard = state.pipeline_lock.lock().await;
    let view = state.orchestrator.handle(&submission).await?;

    info!(
        submission_id = %submission.id,
        record_id = %view.record_id,
        approved = view.is_approved(),
        "Claim processed"
    );
    Ok(Json(view.into()))
}
