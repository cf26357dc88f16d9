//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the claims audit log, using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`repositories::ClaimsRepository`]
//! owns the SQL, and [`adapters::PostgresAuditStore`] implements the
//! `AuditStore` port on top of it so the domain never sees a row type.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PostgresAuditStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let audit = PostgresAuditStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::ClaimsRepository;
pub use adapters::PostgresAuditStore;
