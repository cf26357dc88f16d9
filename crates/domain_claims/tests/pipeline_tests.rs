//! End-to-end pipeline scenarios over the in-memory ports

use core_kernel::{Currency, Money};
use domain_claims::{ClaimError, Corroboration, DamageCategory, PipelineStage};
use test_utils::fixtures::{fire_submission, rain_submission};
use test_utils::{assert_approved, assert_awaiting_refund, assert_denied, ClaimSubmissionBuilder, StubPorts};

#[tokio::test]
async fn test_rain_claim_with_rainfall_is_paid() {
    let ports = StubPorts::approving(2400);

    let view = ports.orchestrator().handle(&rain_submission()).await.unwrap();

    assert_approved(&view, &Money::from_major(2400, Currency::EUR));
    let record = ports.audit.get(view.record_id).await.unwrap();
    assert!(record.decision.approved);
    assert_eq!(record.refund_tx.as_ref(), view.refund_tx());
    assert_eq!(record.policy_no.as_deref(), Some("DEMO-12345"));
    assert_eq!(
        ports.refunds.issued().await,
        vec![(Money::from_major(2400, Currency::EUR), "marco.rossi@example.ch".to_string())]
    );
}

#[tokio::test]
async fn test_fire_claim_is_denied_without_payout() {
    let ports = StubPorts::denying();

    let view = ports.orchestrator().handle(&fire_submission()).await.unwrap();

    assert_denied(&view);
    assert_eq!(view.category, DamageCategory::FireDamage);
    assert_eq!(view.corroboration, Corroboration::Corroborated);
    assert_eq!(ports.refunds.attempts(), 0);

    let record = ports.audit.get(view.record_id).await.unwrap();
    assert!(!record.decision.approved);
    assert!(record.refund_tx.is_none());
}

#[tokio::test]
async fn test_failed_refund_leaves_approved_record_unpaid() {
    let ports = StubPorts::failing_refund();

    let err = ports
        .orchestrator()
        .handle(&ClaimSubmissionBuilder::new().build())
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(PipelineStage::Refund));
    let record_id = err.record_id().expect("refund failure keeps the record");
    let record = ports.audit.get(record_id).await.unwrap();
    assert_awaiting_refund(&record);
    assert_eq!(ports.refunds.attempts(), 1);
}

#[tokio::test]
async fn test_classifier_outage_stores_nothing() {
    let ports = StubPorts::classifier_down();

    let err = ports
        .orchestrator()
        .handle(&ClaimSubmissionBuilder::new().build())
        .await
        .unwrap_err();

    assert!(matches!(err, ClaimError::Classification(_)));
    assert!(ports.audit.is_empty().await);
    assert_eq!(ports.weather.calls(), 0);
}
