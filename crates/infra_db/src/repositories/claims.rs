//! Claims audit log repository
//!
//! The `claims` table is append-only: rows are inserted once and the only
//! permitted change is setting a NULL `refund_tx`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Structured damage assessment stored in the `damage_info` column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageInfo {
    pub category: String,
    pub estimate: i64,
}

/// A row of the `claims` table
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub policy_no: Option<String>,
    pub name: String,
    pub email: String,
    pub date_of_loss: NaiveDate,
    pub location: String,
    pub damage_info: Json<DamageInfo>,
    pub weather_ok: bool,
    pub weather_status: String,
    pub approved: bool,
    pub notes: String,
    pub refund_tx: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for inserting a claim row
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub id: Uuid,
    pub policy_no: Option<String>,
    pub name: String,
    pub email: String,
    pub date_of_loss: NaiveDate,
    pub location: String,
    pub damage_info: DamageInfo,
    pub weather_ok: bool,
    pub weather_status: String,
    pub approved: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, policy_no, name, email, date_of_loss, location, damage_info,
           weather_ok, weather_status, approved, notes, refund_tx,
           created_at, updated_at
    FROM claims
"#;

/// Repository for the claims audit log
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new claim row with `refund_tx` NULL
    pub async fn insert(&self, claim: &NewClaim) -> Result<Uuid, DatabaseError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO claims (
                id, policy_no, name, email, date_of_loss, location, damage_info,
                weather_ok, weather_status, approved, notes, refund_tx,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NULL, $12, $12)
            RETURNING id
            "#,
        )
        .bind(claim.id)
        .bind(&claim.policy_no)
        .bind(&claim.name)
        .bind(&claim.email)
        .bind(claim.date_of_loss)
        .bind(&claim.location)
        .bind(Json(claim.damage_info.clone()))
        .bind(claim.weather_ok)
        .bind(&claim.weather_status)
        .bind(claim.approved)
        .bind(&claim.notes)
        .bind(claim.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        debug!(claim_id = %id, "Inserted claim row");
        Ok(id)
    }

    /// Sets the refund transaction of a claim that has none yet
    ///
    /// # Errors
    ///
    /// - `NotFound` if no claim has this id
    /// - `RefundAlreadyRecorded` if the claim already carries a refund
    pub async fn update_refund_tx(&self, id: Uuid, refund_tx: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET refund_tx = $2, updated_at = now()
            WHERE id = $1 AND refund_tx IS NULL
            "#,
        )
        .bind(id)
        .bind(refund_tx)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 1 {
            debug!(claim_id = %id, refund_tx, "Attached refund to claim row");
            return Ok(());
        }

        // Distinguish a missing row from one that was already paid
        match self.find_by_id(id).await? {
            None => Err(DatabaseError::not_found("Claim", id)),
            Some(_) => Err(DatabaseError::RefundAlreadyRecorded(id.to_string())),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ClaimRow, DatabaseError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Approved claims without a recorded refund, oldest first
    pub async fn find_awaiting_refund(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(&format!(
            "{} WHERE approved AND refund_tx IS NULL ORDER BY created_at",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM claims")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseError::from(&e))
    }
}
