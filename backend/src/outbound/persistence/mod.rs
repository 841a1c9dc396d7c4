//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Implements the job repository port over PostgreSQL via `diesel-async`
//! with `bb8` connection pooling. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; only domain types
//! cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use jobboard::outbound::persistence::{DbPool, DieselJobRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jobboard")).await?;
//! let repo = DieselJobRepository::new(pool);
//! ```

mod diesel_helpers;
mod diesel_job_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_job_repository::DieselJobRepository;
pub use migrations::{MIGRATIONS, MigrationError, revert_all_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
