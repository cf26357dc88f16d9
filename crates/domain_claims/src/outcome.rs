//! What the presentation layer receives after a claim is processed

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimRecordId, Money};
use crate::assessment::DamageCategory;
use crate::corroboration::Corroboration;
use crate::record::RefundTransactionId;

/// Steps of the claim pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Classification,
    Weather,
    Decision,
    AuditInsert,
    Refund,
    AuditUpdate,
}

impl PipelineStage {
    /// Human readable label for progress traces
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Classification => "Analyzing damage photo",
            PipelineStage::Weather => "Checking weather data",
            PipelineStage::Decision => "Running decision engine",
            PipelineStage::AuditInsert => "Recording claim",
            PipelineStage::Refund => "Issuing refund",
            PipelineStage::AuditUpdate => "Recording refund",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Approval or denial, with what the claimant needs to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Approved { refund_tx: RefundTransactionId },
    Denied { reason: String },
}

/// Result handed back to the caller of the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub record_id: ClaimRecordId,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub category: DamageCategory,
    pub estimate: Money,
    pub corroboration: Corroboration,
    pub trace: Vec<PipelineStage>,
}

impl OutcomeView {
    pub fn is_approved(&self) -> bool {
        matches!(self.outcome, Outcome::Approved { .. })
    }

    pub fn refund_tx(&self) -> Option<&RefundTransactionId> {
        match &self.outcome {
            Outcome::Approved { refund_tx } => Some(refund_tx),
            Outcome::Denied { .. } => None,
        }
    }

    pub fn denial_reason(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Approved { .. } => None,
            Outcome::Denied { reason } => Some(reason),
        }
    }

    /// Message shown to the claimant
    pub fn message(&self) -> String {
        match &self.outcome {
            Outcome::Approved { refund_tx } => format!(
                "Claim approved. Refund of {} sent. Transaction ID: {}",
                self.estimate, refund_tx
            ),
            Outcome::Denied { reason } => format!("Claim denied. {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn view(outcome: Outcome) -> OutcomeView {
        OutcomeView {
            record_id: ClaimRecordId::new(),
            outcome,
            category: DamageCategory::RainDamage,
            estimate: Money::from_major(1500, Currency::EUR),
            corroboration: Corroboration::Corroborated,
            trace: vec![PipelineStage::Classification],
        }
    }

    #[test]
    fn test_approved_view_accessors() {
        let v = view(Outcome::Approved {
            refund_tx: RefundTransactionId::new("re_1"),
        });
        assert!(v.is_approved());
        assert_eq!(v.refund_tx().map(|t| t.as_str()), Some("re_1"));
        assert!(v.denial_reason().is_none());
        assert!(v.message().contains("re_1"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let v = view(Outcome::Denied {
            reason: "No matching weather event found".to_string(),
        });
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["status"], "denied");
        assert_eq!(json["reason"], "No matching weather event found");
        assert_eq!(json["category"], "rain_damage");
        assert_eq!(json["trace"][0], "classification");
    }
}
