//! PostgreSQL Audit Store Adapter
//!
//! Implements the claims domain `AuditStore` port on top of
//! [`ClaimsRepository`], translating between `ClaimRecord` and table rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::PostgresAuditStore;
//! use domain_claims::AuditStore;
//! use std::sync::Arc;
//!
//! let audit: Arc<dyn AuditStore> = Arc::new(PostgresAuditStore::new(pool));
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use std::str::FromStr;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimRecordId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{
    AuditStore, ClaimRecord, ClaimRecordUpdate, Corroboration, DamageAssessment, DamageCategory,
    Decision, RefundTransactionId,
};

use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRow, ClaimsRepository, DamageInfo, NewClaim};

const ADAPTER_ID: &str = "postgres-audit-store";

/// PostgreSQL-backed implementation of the `AuditStore` port
///
/// Database errors are translated to `PortError` through
/// `From<DatabaseError>`.
#[derive(Debug, Clone)]
pub struct PostgresAuditStore {
    repository: ClaimsRepository,
}

impl PostgresAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }

    /// Returns the underlying repository for queries outside the port
    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }

    /// Loads a stored record
    pub async fn get(&self, record_id: ClaimRecordId) -> Result<ClaimRecord, PortError> {
        let row = self.repository.get_by_id(*record_id.as_uuid()).await?;
        row_to_record(row)
    }

    /// Approved records that never had a refund attached
    pub async fn awaiting_refund(&self) -> Result<Vec<(ClaimRecordId, ClaimRecord)>, PortError> {
        self.repository
            .find_awaiting_refund()
            .await?
            .into_iter()
            .map(|row| {
                let id = ClaimRecordId::from_uuid(row.id);
                row_to_record(row).map(|record| (id, record))
            })
            .collect()
    }
}

impl DomainPort for PostgresAuditStore {}

#[async_trait]
impl HealthCheckable for PostgresAuditStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms),
            Err(e) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                .with_message(format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl AuditStore for PostgresAuditStore {
    #[instrument(skip(self, record), fields(approved = record.decision.approved))]
    async fn insert(&self, record: &ClaimRecord) -> Result<ClaimRecordId, PortError> {
        let id = ClaimRecordId::new_v7();
        let row = record_to_new_claim(id, record);
        self.repository.insert(&row).await?;
        debug!(record_id = %id, "Claim record stored");
        Ok(id)
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        record_id: ClaimRecordId,
        update: ClaimRecordUpdate,
    ) -> Result<(), PortError> {
        match update.refund_tx {
            Some(refund_tx) => {
                self.repository
                    .update_refund_tx(*record_id.as_uuid(), refund_tx.as_str())
                    .await?;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

fn record_to_new_claim(id: ClaimRecordId, record: &ClaimRecord) -> NewClaim {
    NewClaim {
        id: *id.as_uuid(),
        policy_no: record.policy_no.clone(),
        name: record.claimant_name.clone(),
        email: record.claimant_email.clone(),
        date_of_loss: record.date_of_loss,
        location: record.location.clone(),
        damage_info: DamageInfo {
            category: record.assessment.category.as_str().to_string(),
            estimate: i64::from(record.assessment.estimate),
        },
        weather_ok: record.weather_ok(),
        weather_status: record.corroboration.as_str().to_string(),
        approved: record.decision.approved,
        notes: record.decision.reason.clone(),
        created_at: record.created_at,
    }
}

fn row_to_record(row: ClaimRow) -> Result<ClaimRecord, PortError> {
    let info = row.damage_info.0;
    let category = DamageCategory::from_str(&info.category)
        .map_err(|e| PortError::transformation(e.to_string()))?;
    let estimate = u32::try_from(info.estimate).map_err(|_| {
        DatabaseError::SerializationError(format!("estimate {} out of range", info.estimate))
    })?;
    let corroboration = Corroboration::from_str(&row.weather_status)
        .map_err(|e| PortError::transformation(e.to_string()))?;
    let decision = if row.approved {
        Decision::approve()
    } else {
        Decision::deny(row.notes)
    };

    Ok(ClaimRecord {
        claimant_name: row.name,
        claimant_email: row.email,
        date_of_loss: row.date_of_loss,
        location: row.location,
        policy_no: row.policy_no,
        assessment: DamageAssessment { category, estimate },
        corroboration,
        decision,
        refund_tx: row.refund_tx.map(RefundTransactionId::new),
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sqlx::types::Json;

    fn row(approved: bool, refund_tx: Option<&str>) -> ClaimRow {
        ClaimRow {
            id: uuid::Uuid::now_v7(),
            policy_no: Some("DEMO-12345".to_string()),
            name: "Eva Brunner".to_string(),
            email: "eva@example.com".to_string(),
            date_of_loss: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            location: "Bern".to_string(),
            damage_info: Json(DamageInfo {
                category: "rain_damage".to_string(),
                estimate: 1800,
            }),
            weather_ok: approved,
            weather_status: if approved { "corroborated" } else { "data_unavailable" }.to_string(),
            approved,
            notes: if approved {
                String::new()
            } else {
                "No matching weather event found".to_string()
            },
            refund_tx: refund_tx.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_record_approved() {
        let record = row_to_record(row(true, Some("re_1"))).unwrap();
        assert_eq!(record.assessment.category, DamageCategory::RainDamage);
        assert_eq!(record.assessment.estimate, 1800);
        assert!(record.decision.approved);
        assert_eq!(record.refund_tx, Some(RefundTransactionId::new("re_1")));
    }

    #[test]
    fn test_row_to_record_keeps_denial_reason_and_status() {
        let record = row_to_record(row(false, None)).unwrap();
        assert_eq!(record.decision.reason, "No matching weather event found");
        assert_eq!(record.corroboration, Corroboration::DataUnavailable);
        assert!(!record.weather_ok());
    }

    #[test]
    fn test_unknown_category_is_transformation_error() {
        let mut bad = row(true, None);
        bad.damage_info = Json(DamageInfo {
            category: "hail".to_string(),
            estimate: 500,
        });
        assert!(matches!(
            row_to_record(bad),
            Err(PortError::Transformation { .. })
        ));
    }

    #[test]
    fn test_record_round_trips_through_row_values() {
        let original = row_to_record(row(false, None)).unwrap();
        let id = ClaimRecordId::new_v7();
        let new_claim = record_to_new_claim(id, &original);
        assert_eq!(new_claim.id, *id.as_uuid());
        assert_eq!(new_claim.weather_status, "data_unavailable");
        assert!(!new_claim.weather_ok);
        assert_eq!(new_claim.notes, original.decision.reason);
    }
}
