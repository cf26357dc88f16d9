//! Claims DTOs

use axum::extract::Multipart;
use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{ClaimRecordId, Money};
use domain_claims::{
    ClaimSubmission, Corroboration, DamageCategory, OutcomeView, PipelineStage,
    RefundTransactionId,
};

use crate::error::ApiError;

/// Text and file fields of the claim upload form
///
/// Fields: `name`, `email`, `date_of_loss` (YYYY-MM-DD), `location`,
/// optional `policy_no`, and the `photo` file.
#[derive(Debug, Default)]
pub struct ClaimForm {
    pub name: String,
    pub email: String,
    pub date_of_loss: String,
    pub location: String,
    pub policy_no: Option<String>,
    pub photo: Vec<u8>,
}

impl ClaimForm {
    /// Reads every part of the multipart body; unknown fields are ignored
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ClaimForm::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "photo" => form.photo = field.bytes().await?.to_vec(),
                "name" => form.name = field.text().await?,
                "email" => form.email = field.text().await?,
                "date_of_loss" => form.date_of_loss = field.text().await?,
                "location" => form.location = field.text().await?,
                "policy_no" => form.policy_no = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(form)
    }

    /// Builds the domain submission
    ///
    /// Only the date is checked here; every other rule is applied by the
    /// orchestrator so all problems are reported together.
    pub fn into_submission(self) -> Result<ClaimSubmission, ApiError> {
        let date_of_loss = NaiveDate::parse_from_str(self.date_of_loss.trim(), "%Y-%m-%d")
            .map_err(|_| {
                ApiError::Validation(vec![format!(
                    "date of loss '{}' is not a YYYY-MM-DD date",
                    self.date_of_loss.trim()
                )])
            })?;

        let submission =
            ClaimSubmission::new(self.name, self.email, date_of_loss, self.location, self.photo);
        Ok(match self.policy_no {
            Some(policy_no) => submission.with_policy_no(policy_no),
            None => submission,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TraceStep {
    pub stage: PipelineStage,
    pub label: &'static str,
}

/// Response for a processed claim, approved or denied
#[derive(Debug, Serialize)]
pub struct ClaimOutcomeResponse {
    pub record_id: ClaimRecordId,
    pub approved: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_tx: Option<RefundTransactionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub category: DamageCategory,
    pub estimate: Money,
    pub corroboration: Corroboration,
    pub trace: Vec<TraceStep>,
}

impl From<OutcomeView> for ClaimOutcomeResponse {
    fn from(view: OutcomeView) -> Self {
        Self {
            record_id: view.record_id,
            approved: view.is_approved(),
            message: view.message(),
            refund_tx: view.refund_tx().cloned(),
            reason: view.denial_reason().map(str::to_string),
            category: view.category,
            estimate: view.estimate,
            corroboration: view.corroboration,
            trace: view
                .trace
                .iter()
                .map(|stage| TraceStep {
                    stage: *stage,
                    label: stage.label(),
                })
                .collect(),
        }
    }
}
