//! Test Utilities Crate
//!
//! Shared test infrastructure for the claims intake workspace.
//!
//! # Modules
//!
//! - `fixtures`: photo bytes, dates and ready-made submissions
//! - `builders`: `ClaimSubmissionBuilder` with faked claimant data
//! - `stubs`: in-memory ports wired into a `ClaimOrchestrator`
//! - `database`: PostgreSQL testcontainer with the claims schema
//! - `assertions`: assertion helpers for outcomes and records
//! - `generators`: proptest strategies for domain values

pub mod fixtures;
pub mod builders;
pub mod stubs;
pub mod database;
pub mod assertions;
pub mod generators;

pub use builders::*;
pub use stubs::*;
pub use database::*;
pub use assertions::*;
