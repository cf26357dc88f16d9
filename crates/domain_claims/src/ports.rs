//! Claims Domain Ports
//!
//! Every external collaborator of the claim pipeline is reached through one
//! of these traits. Adapters live elsewhere:
//!
//! - **Damage classifier**: HTTP inference service (`infra_external`)
//! - **Weather corroborator**: OpenWeatherMap (`infra_external`)
//! - **Refund issuer**: Stripe (`infra_external`)
//! - **Audit store**: PostgreSQL (`infra_db`)
//! - **Mock adapters**: in-memory, for tests (`mock` module)
//!
//! # Usage
//!
//! ```rust,ignore
//! let orchestrator = ClaimOrchestrator::new(
//!     Arc::new(HttpDamageClassifier::new(classifier_config)?),
//!     Arc::new(OpenWeatherCorroborator::new(weather_config)?),
//!     Arc::new(StripeRefundIssuer::new(payment_config)?),
//!     Arc::new(PostgresAuditStore::new(pool)),
//! );
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ClaimRecordId, DomainPort, Money, PortError};

use crate::assessment::{DamageAssessment, DamageCategory};
use crate::corroboration::Corroboration;
use crate::record::{ClaimRecord, ClaimRecordUpdate, RefundTransactionId};

/// Classifies a damage photo into a category and estimate
#[async_trait]
pub trait DamageClassifier: DomainPort {
    /// Returns `DamageAssessment::no_detection()` when nothing is found;
    /// errors are reserved for failures to run the classification at all.
    async fn classify(&self, photo: &[u8]) -> Result<DamageAssessment, PortError>;
}

/// Checks recorded weather against a claimed loss
#[async_trait]
pub trait WeatherCorroborator: DomainPort {
    async fn corroborate(
        &self,
        location: &str,
        date_of_loss: NaiveDate,
        category: DamageCategory,
    ) -> Result<Corroboration, PortError>;
}

/// Pays out an approved claim
#[async_trait]
pub trait RefundIssuer: DomainPort {
    /// Creates the payment and its refund, returning the refund transaction id
    async fn issue_refund(
        &self,
        amount: Money,
        payee_email: &str,
    ) -> Result<RefundTransactionId, PortError>;
}

/// Append-only persistence of claim records
#[async_trait]
pub trait AuditStore: DomainPort {
    /// Inserts a new record and returns its identifier
    async fn insert(&self, record: &ClaimRecord) -> Result<ClaimRecordId, PortError>;

    /// Applies a partial update to an existing record
    async fn update(
        &self,
        record_id: ClaimRecordId,
        update: ClaimRecordUpdate,
    ) -> Result<(), PortError>;
}

/// Mock implementations of the claims ports for testing
///
/// These adapters keep state in memory and can be told to fail, which is
/// enough to drive every branch of the orchestrator.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Classifier returning a fixed assessment
    #[derive(Debug)]
    pub struct MockDamageClassifier {
        result: Option<DamageAssessment>,
        calls: AtomicUsize,
    }

    impl MockDamageClassifier {
        pub fn returning(assessment: DamageAssessment) -> Self {
            Self {
                result: Some(assessment),
                calls: AtomicUsize::new(0),
            }
        }

        /// A classifier whose backend is down
        pub fn unavailable() -> Self {
            Self {
                result: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockDamageClassifier {}

    #[async_trait]
    impl DamageClassifier for MockDamageClassifier {
        async fn classify(&self, _photo: &[u8]) -> Result<DamageAssessment, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .ok_or_else(|| PortError::service_unavailable("mock-classifier"))
        }
    }

    /// Corroborator returning a fixed status
    #[derive(Debug)]
    pub struct MockWeatherCorroborator {
        result: Option<Corroboration>,
        calls: AtomicUsize,
    }

    impl MockWeatherCorroborator {
        pub fn returning(corroboration: Corroboration) -> Self {
            Self {
                result: Some(corroboration),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                result: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockWeatherCorroborator {}

    #[async_trait]
    impl WeatherCorroborator for MockWeatherCorroborator {
        async fn corroborate(
            &self,
            _location: &str,
            _date_of_loss: NaiveDate,
            _category: DamageCategory,
        ) -> Result<Corroboration, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .ok_or_else(|| PortError::service_unavailable("mock-weather"))
        }
    }

    /// Refund issuer that records every payout request
    #[derive(Debug, Default)]
    pub struct MockRefundIssuer {
        fail: bool,
        issued: Arc<RwLock<Vec<(Money, String)>>>,
        attempts: AtomicUsize,
    }

    impl MockRefundIssuer {
        pub fn new() -> Self {
            Self::default()
        }

        /// An issuer whose payment provider rejects every call
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        /// Successful payouts as (amount, payee email)
        pub async fn issued(&self) -> Vec<(Money, String)> {
            self.issued.read().await.clone()
        }

        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockRefundIssuer {}

    #[async_trait]
    impl RefundIssuer for MockRefundIssuer {
        async fn issue_refund(
            &self,
            amount: Money,
            payee_email: &str,
        ) -> Result<RefundTransactionId, PortError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(PortError::service_unavailable("mock-payments"));
            }
            self.issued
                .write()
                .await
                .push((amount, payee_email.to_string()));
            Ok(RefundTransactionId::new(format!("re_mock_{}", attempt)))
        }
    }

    /// In-memory audit store
    #[derive(Debug, Default)]
    pub struct InMemoryAuditStore {
        records: Arc<RwLock<HashMap<ClaimRecordId, ClaimRecord>>>,
        order: Arc<RwLock<Vec<ClaimRecordId>>>,
        fail_inserts: bool,
        fail_updates: bool,
    }

    impl InMemoryAuditStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store that rejects inserts
        pub fn failing_inserts() -> Self {
            Self {
                fail_inserts: true,
                ..Self::default()
            }
        }

        /// A store that accepts inserts but rejects updates
        pub fn failing_updates() -> Self {
            Self {
                fail_updates: true,
                ..Self::default()
            }
        }

        pub async fn get(&self, id: ClaimRecordId) -> Option<ClaimRecord> {
            self.records.read().await.get(&id).cloned()
        }

        /// All records in insertion order
        pub async fn records(&self) -> Vec<(ClaimRecordId, ClaimRecord)> {
            let records = self.records.read().await;
            self.order
                .read()
                .await
                .iter()
                .filter_map(|id| records.get(id).map(|r| (*id, r.clone())))
                .collect()
        }

        pub async fn len(&self) -> usize {
            self.records.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.records.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryAuditStore {}

    #[async_trait]
    impl AuditStore for InMemoryAuditStore {
        async fn insert(&self, record: &ClaimRecord) -> Result<ClaimRecordId, PortError> {
            if self.fail_inserts {
                return Err(PortError::connection("mock audit store is offline"));
            }
            let id = ClaimRecordId::new_v7();
            self.records.write().await.insert(id, record.clone());
            self.order.write().await.push(id);
            Ok(id)
        }

        async fn update(
            &self,
            record_id: ClaimRecordId,
            update: ClaimRecordUpdate,
        ) -> Result<(), PortError> {
            if self.fail_updates {
                return Err(PortError::connection("mock audit store is offline"));
            }
            let mut records = self.records.write().await;
            let record = records
                .get_mut(&record_id)
                .ok_or_else(|| PortError::not_found("ClaimRecord", record_id))?;
            if update.refund_tx.is_some() && record.refund_tx.is_some() {
                return Err(PortError::validation(format!(
                    "Refund already recorded for claim {}",
                    record_id
                )));
            }
            update.apply_to(record);
            Ok(())
        }
    }
}
