//! Repository implementations
//!
//! Repositories own the SQL and map between rows and plain Rust values.
//! Queries are checked at runtime so the crate builds without a live database.

pub mod claims;

pub use claims::{ClaimRow, ClaimsRepository, DamageInfo, NewClaim};
