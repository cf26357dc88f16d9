//! Audit record of a processed claim
//!
//! One record per submission. It is inserted once with no refund
//! transaction and updated at most once afterwards to attach one. Records
//! are never deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assessment::DamageAssessment;
use crate::corroboration::Corroboration;
use crate::decision::Decision;
use crate::submission::ClaimSubmission;

/// Opaque transaction identifier returned by the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefundTransactionId(String);

impl RefundTransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefundTransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable row capturing a claim's inputs, automated decision and payment outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claimant_name: String,
    pub claimant_email: String,
    pub date_of_loss: NaiveDate,
    pub location: String,
    pub policy_no: Option<String>,
    pub assessment: DamageAssessment,
    pub corroboration: Corroboration,
    pub decision: Decision,
    pub refund_tx: Option<RefundTransactionId>,
    pub created_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Builds the record for insertion, with no refund transaction yet
    pub fn from_pipeline(
        submission: &ClaimSubmission,
        assessment: DamageAssessment,
        corroboration: Corroboration,
        decision: Decision,
    ) -> Self {
        Self {
            claimant_name: submission.claimant_name.clone(),
            claimant_email: submission.claimant_email.clone(),
            date_of_loss: submission.date_of_loss,
            location: submission.location.clone(),
            policy_no: submission.policy_no.clone(),
            assessment,
            corroboration,
            decision,
            refund_tx: None,
            created_at: Utc::now(),
        }
    }

    /// The boolean corroboration signal as persisted in `weather_ok`
    pub fn weather_ok(&self) -> bool {
        self.corroboration.is_corroborated()
    }

    /// Approved but never paid out; needs manual reconciliation
    pub fn is_awaiting_refund(&self) -> bool {
        self.decision.approved && self.refund_tx.is_none()
    }
}

/// Partial update applied to an existing record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimRecordUpdate {
    pub refund_tx: Option<RefundTransactionId>,
}

impl ClaimRecordUpdate {
    /// Update attaching a refund transaction
    pub fn refund(refund_tx: RefundTransactionId) -> Self {
        Self {
            refund_tx: Some(refund_tx),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.refund_tx.is_none()
    }

    /// Applies the update to an in-memory record
    pub fn apply_to(&self, record: &mut ClaimRecord) {
        if let Some(refund_tx) = &self.refund_tx {
            record.refund_tx = Some(refund_tx.clone());
        }
    }
}
