//! Stub Ports
//!
//! Bundles the in-memory port implementations from
//! `domain_claims::ports::mock` so tests can build an orchestrator in one
//! line and inspect every collaborator afterwards.

use std::sync::Arc;

use domain_claims::ports::mock::{
    InMemoryAuditStore, MockDamageClassifier, MockRefundIssuer, MockWeatherCorroborator,
};
use domain_claims::{ClaimOrchestrator, Corroboration, DamageAssessment, DamageCategory};

/// Stub collaborators of one orchestrator
pub struct StubPorts {
    pub classifier: Arc<MockDamageClassifier>,
    pub weather: Arc<MockWeatherCorroborator>,
    pub refunds: Arc<MockRefundIssuer>,
    pub audit: Arc<InMemoryAuditStore>,
}

impl StubPorts {
    pub fn new(
        classifier: MockDamageClassifier,
        weather: MockWeatherCorroborator,
        refunds: MockRefundIssuer,
        audit: InMemoryAuditStore,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            weather: Arc::new(weather),
            refunds: Arc::new(refunds),
            audit: Arc::new(audit),
        }
    }

    /// Rain damage with rainfall on record; the claim gets paid
    pub fn approving(estimate: u32) -> Self {
        Self::new(
            MockDamageClassifier::returning(DamageAssessment {
                category: DamageCategory::RainDamage,
                estimate,
            }),
            MockWeatherCorroborator::returning(Corroboration::Corroborated),
            MockRefundIssuer::new(),
            InMemoryAuditStore::new(),
        )
    }

    /// Fire damage; the claim is denied
    pub fn denying() -> Self {
        Self::new(
            MockDamageClassifier::returning(DamageAssessment {
                category: DamageCategory::FireDamage,
                estimate: 2000,
            }),
            MockWeatherCorroborator::returning(Corroboration::Corroborated),
            MockRefundIssuer::new(),
            InMemoryAuditStore::new(),
        )
    }

    /// Approved claim whose payout fails
    pub fn failing_refund() -> Self {
        Self::new(
            MockDamageClassifier::returning(DamageAssessment {
                category: DamageCategory::RainDamage,
                estimate: 900,
            }),
            MockWeatherCorroborator::returning(Corroboration::Corroborated),
            MockRefundIssuer::failing(),
            InMemoryAuditStore::new(),
        )
    }

    /// Classifier backend is down
    pub fn classifier_down() -> Self {
        Self::new(
            MockDamageClassifier::unavailable(),
            MockWeatherCorroborator::returning(Corroboration::Corroborated),
            MockRefundIssuer::new(),
            InMemoryAuditStore::new(),
        )
    }

    pub fn orchestrator(&self) -> ClaimOrchestrator {
        ClaimOrchestrator::new(
            self.classifier.clone(),
            self.weather.clone(),
            self.refunds.clone(),
            self.audit.clone(),
        )
    }
}
