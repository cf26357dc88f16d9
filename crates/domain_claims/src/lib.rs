//! Claims Intake Domain
//!
//! This crate implements the automated decision pipeline for
//! property-damage claims: a photo is classified, the weather at the place
//! and date of loss is checked, fixed rules decide, the outcome is written
//! to an audit store and approved claims are paid out.
//!
//! # Pipeline
//!
//! ```text
//! Submission -> Classification -> Weather -> Decision -> Audit -> Refund
//! ```
//!
//! Collaborators are reached only through the traits in [`ports`].

pub mod submission;
pub mod assessment;
pub mod corroboration;
pub mod decision;
pub mod record;
pub mod outcome;
pub mod ports;
pub mod policy;
pub mod orchestrator;
pub mod error;

pub use submission::ClaimSubmission;
pub use assessment::{DamageAssessment, DamageCategory, Detection};
pub use corroboration::Corroboration;
pub use decision::{evaluate, Decision, NO_MATCHING_WEATHER};
pub use record::{ClaimRecord, ClaimRecordUpdate, RefundTransactionId};
pub use outcome::{Outcome, OutcomeView, PipelineStage};
pub use ports::{AuditStore, DamageClassifier, RefundIssuer, WeatherCorroborator};
pub use policy::{PolicyValidator, StaticPolicyRegistry};
pub use orchestrator::ClaimOrchestrator;
pub use error::ClaimError;
