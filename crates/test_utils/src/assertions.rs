//! Custom Test Assertions

use core_kernel::Money;
use domain_claims::{ClaimRecord, OutcomeView, NO_MATCHING_WEATHER};

/// Asserts the claim was approved and paid out for `expected`
pub fn assert_approved(view: &OutcomeView, expected: &Money) {
    assert!(view.is_approved(), "Expected approval, got {:?}", view.outcome);
    assert!(view.refund_tx().is_some(), "Approved claim has no refund transaction");
    assert_eq!(&view.estimate, expected, "Unexpected payout amount");
}

/// Asserts the claim was denied with the standard reason
pub fn assert_denied(view: &OutcomeView) {
    assert_eq!(
        view.denial_reason(),
        Some(NO_MATCHING_WEATHER),
        "Expected denial, got {:?}",
        view.outcome
    );
}

/// Asserts the record is approved but was never paid
pub fn assert_awaiting_refund(record: &ClaimRecord) {
    assert!(record.decision.approved, "Record is not approved");
    assert!(
        record.refund_tx.is_none(),
        "Record unexpectedly carries refund {:?}",
        record.refund_tx
    );
}
