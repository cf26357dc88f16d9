//! Claim orchestrator
//!
//! Sequences the collaborators for one submission:
//!
//! ```text
//! classify photo -> corroborate weather -> decide -> insert audit record
//!     -> (approved) issue refund -> attach refund to audit record
//! ```
//!
//! Each step runs only after the previous one finished. Nothing is retried
//! and nothing is rolled back: a refund failure leaves the approved record
//! in place without a transaction id and is reported to the caller.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use core_kernel::Currency;

use crate::corroboration::Corroboration;
use crate::decision::evaluate;
use crate::error::ClaimError;
use crate::outcome::{Outcome, OutcomeView, PipelineStage};
use crate::ports::{AuditStore, DamageClassifier, RefundIssuer, WeatherCorroborator};
use crate::record::{ClaimRecord, ClaimRecordUpdate};
use crate::submission::{latest_local_date, ClaimSubmission};

/// Runs the automated decision pipeline for submitted claims
///
/// All collaborators are injected; the orchestrator owns no global state.
#[derive(Clone)]
pub struct ClaimOrchestrator {
    classifier: Arc<dyn DamageClassifier>,
    corroborator: Arc<dyn WeatherCorroborator>,
    refunds: Arc<dyn RefundIssuer>,
    audit: Arc<dyn AuditStore>,
    currency: Currency,
}

impl ClaimOrchestrator {
    /// Creates an orchestrator paying out in EUR
    pub fn new(
        classifier: Arc<dyn DamageClassifier>,
        corroborator: Arc<dyn WeatherCorroborator>,
        refunds: Arc<dyn RefundIssuer>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            classifier,
            corroborator,
            refunds,
            audit,
            currency: Currency::EUR,
        }
    }

    /// Sets the payout currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Processes one submission to completion
    ///
    /// # Errors
    ///
    /// - `ClaimError::Validation` if the submission is malformed; nothing is stored
    /// - `Classification`, `Corroboration`, `AuditInsert` if a collaborator
    ///   fails before the record exists; nothing is stored
    /// - `Refund` if payout fails; the approved record stays without a refund id
    /// - `AuditUpdate` if the refund went out but could not be recorded
    pub async fn handle(&self, submission: &ClaimSubmission) -> Result<OutcomeView, ClaimError> {
        submission.validate_at(latest_local_date(Utc::now()))?;

        let mut trace = Vec::with_capacity(6);

        trace.push(PipelineStage::Classification);
        let assessment = self
            .classifier
            .classify(&submission.photo)
            .await
            .map_err(ClaimError::Classification)?;
        info!(
            submission_id = %submission.id,
            category = %assessment.category,
            estimate = assessment.estimate,
            "Damage photo classified"
        );

        trace.push(PipelineStage::Weather);
        let corroboration = self
            .corroborator
            .corroborate(&submission.location, submission.date_of_loss, assessment.category)
            .await
            .map_err(ClaimError::Corroboration)?;
        if corroboration == Corroboration::DataUnavailable {
            warn!(
                submission_id = %submission.id,
                location = %submission.location,
                date_of_loss = %submission.date_of_loss,
                "No weather data available; treating as not corroborated"
            );
        }

        trace.push(PipelineStage::Decision);
        let decision = evaluate(assessment.category, corroboration.is_corroborated());

        trace.push(PipelineStage::AuditInsert);
        let record = ClaimRecord::from_pipeline(submission, assessment, corroboration, decision);
        let record_id = self
            .audit
            .insert(&record)
            .await
            .map_err(ClaimError::AuditInsert)?;
        info!(
            submission_id = %submission.id,
            record_id = %record_id,
            approved = record.decision.approved,
            corroboration = %corroboration,
            "Claim recorded"
        );

        let estimate = assessment.estimate_money(self.currency);

        if !record.decision.approved {
            return Ok(OutcomeView {
                record_id,
                outcome: Outcome::Denied {
                    reason: record.decision.reason,
                },
                category: assessment.category,
                estimate,
                corroboration,
                trace,
            });
        }

        trace.push(PipelineStage::Refund);
        let refund_tx = match self
            .refunds
            .issue_refund(estimate, &submission.claimant_email)
            .await
        {
            Ok(refund_tx) => refund_tx,
            Err(source) => {
                error!(
                    record_id = %record_id,
                    error = %source,
                    "Refund failed for approved claim; record left without refund transaction"
                );
                return Err(ClaimError::Refund { record_id, source });
            }
        };

        trace.push(PipelineStage::AuditUpdate);
        if let Err(source) = self
            .audit
            .update(record_id, ClaimRecordUpdate::refund(refund_tx.clone()))
            .await
        {
            error!(
                record_id = %record_id,
                refund_tx = %refund_tx,
                error = %source,
                "Refund issued but audit record could not be updated"
            );
            return Err(ClaimError::AuditUpdate {
                record_id,
                refund_tx,
                source,
            });
        }
        info!(record_id = %record_id, refund_tx = %refund_tx, amount = %estimate, "Refund issued");

        Ok(OutcomeView {
            record_id,
            outcome: Outcome::Approved { refund_tx },
            category: assessment.category,
            estimate,
            corroboration,
            trace,
        })
    }
}
