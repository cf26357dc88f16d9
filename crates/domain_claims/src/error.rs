//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimRecordId, PortError};
use crate::outcome::PipelineStage;
use crate::record::RefundTransactionId;

/// Errors that can occur while taking in and processing a claim
///
/// "No detection" and "no weather match" are not errors; they are ordinary
/// assessments handled by the decision rules. Everything here aborts the
/// claim and is surfaced to the caller.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid claim submission: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown policy number: {0}")]
    PolicyNotFound(String),

    #[error("Policy lookup failed: {0}")]
    PolicyLookup(#[source] PortError),

    #[error("Unknown damage category: {0}")]
    UnknownCategory(String),

    #[error("Unknown corroboration status: {0}")]
    UnknownCorroboration(String),

    #[error("Damage classification failed: {0}")]
    Classification(#[source] PortError),

    #[error("Weather corroboration failed: {0}")]
    Corroboration(#[source] PortError),

    #[error("Audit record could not be written: {0}")]
    AuditInsert(#[source] PortError),

    #[error("Refund issuance failed for {record_id}: {source}")]
    Refund {
        record_id: ClaimRecordId,
        #[source]
        source: PortError,
    },

    #[error("Refund {refund_tx} issued but {record_id} could not be updated: {source}")]
    AuditUpdate {
        record_id: ClaimRecordId,
        refund_tx: RefundTransactionId,
        #[source]
        source: PortError,
    },
}

impl ClaimError {
    /// Pipeline stage that failed, for errors raised by a collaborator
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            ClaimError::Classification(_) => Some(PipelineStage::Classification),
            ClaimError::Corroboration(_) => Some(PipelineStage::Weather),
            ClaimError::AuditInsert(_) => Some(PipelineStage::AuditInsert),
            ClaimError::Refund { .. } => Some(PipelineStage::Refund),
            ClaimError::AuditUpdate { .. } => Some(PipelineStage::AuditUpdate),
            _ => None,
        }
    }

    /// Audit record left behind by a failure after the insert succeeded
    pub fn record_id(&self) -> Option<ClaimRecordId> {
        match self {
            ClaimError::Refund { record_id, .. } | ClaimError::AuditUpdate { record_id, .. } => {
                Some(*record_id)
            }
            _ => None,
        }
    }

    /// Returns true if the submission itself was rejected before processing
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClaimError::Validation(_) | ClaimError::PolicyNotFound(_))
    }
}
