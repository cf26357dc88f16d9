//! PostgreSQL audit store integration tests
//!
//! These start a PostgreSQL container and need Docker:
//! `cargo test -p infra_db -- --ignored`

use domain_claims::{
    evaluate, AuditStore, ClaimRecord, ClaimRecordUpdate, Corroboration, DamageAssessment,
    DamageCategory, RefundTransactionId,
};
use infra_db::{DatabaseError, PostgresAuditStore};
use core_kernel::{ClaimRecordId, HealthCheckable, AdapterHealth};
use test_utils::{assert_awaiting_refund, fixtures, TestDatabase};

fn record(category: DamageCategory, corroboration: Corroboration) -> ClaimRecord {
    let submission = fixtures::rain_submission();
    let assessment = DamageAssessment {
        category,
        estimate: 2400,
    };
    ClaimRecord::from_pipeline(
        &submission,
        assessment,
        corroboration,
        evaluate(category, corroboration.is_corroborated()),
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_then_attach_refund() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());

    let id = store
        .insert(&record(DamageCategory::RainDamage, Corroboration::Corroborated))
        .await
        .unwrap();
    assert_awaiting_refund(&store.get(id).await.unwrap());
    assert_eq!(store.awaiting_refund().await.unwrap().len(), 1);

    store
        .update(id, ClaimRecordUpdate::refund(RefundTransactionId::new("re_42")))
        .await
        .unwrap();
    let stored = store.get(id).await.unwrap();
    assert_eq!(stored.refund_tx, Some(RefundTransactionId::new("re_42")));
    assert!(store.awaiting_refund().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_refund_cannot_be_overwritten() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());
    let id = store
        .insert(&record(DamageCategory::RainDamage, Corroboration::Corroborated))
        .await
        .unwrap();

    store
        .repository()
        .update_refund_tx(*id.as_uuid(), "re_first")
        .await
        .unwrap();
    let err = store
        .repository()
        .update_refund_tx(*id.as_uuid(), "re_second")
        .await
        .unwrap_err();

    assert!(matches!(err, DatabaseError::RefundAlreadyRecorded(_)));
    assert_eq!(
        store.get(id).await.unwrap().refund_tx,
        Some(RefundTransactionId::new("re_first"))
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_of_unknown_record_is_not_found() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());

    let err = store
        .update(
            ClaimRecordId::new_v7(),
            ClaimRecordUpdate::refund(RefundTransactionId::new("re_1")),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_denied_record_keeps_weather_status() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());

    let id = store
        .insert(&record(DamageCategory::RainDamage, Corroboration::DataUnavailable))
        .await
        .unwrap();
    let stored = store.get(id).await.unwrap();

    assert!(!stored.decision.approved);
    assert_eq!(stored.corroboration, Corroboration::DataUnavailable);
    assert_eq!(stored.decision.reason, "No matching weather event found");
    assert_eq!(store.repository().count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check_reports_healthy() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());

    let result = store.health_check().await;
    assert_eq!(result.status, AdapterHealth::Healthy);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cleared_store_accepts_new_records() {
    let db = TestDatabase::new().await.unwrap();
    let store = PostgresAuditStore::new(db.pool.clone());
    store
        .insert(&record(DamageCategory::FireDamage, Corroboration::NotCorroborated))
        .await
        .unwrap();

    db.clear_data().await.unwrap();
    assert_eq!(store.repository().count().await.unwrap(), 0);

    let id = store
        .insert(&record(DamageCategory::RainDamage, Corroboration::Corroborated))
        .await
        .unwrap();
    assert_awaiting_refund(&store.get(id).await.unwrap());
    assert_eq!(store.repository().count().await.unwrap(), 1);
}
