//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgThreatRepository`] - Threat storage, statistics and dashboard counters
//! - [`PgLogRepository`] - Security log queries
//! - [`PgDatabaseHealth`] - Liveness probe

pub mod pg_health_repository;
pub mod pg_log_repository;
pub mod pg_threat_repository;

pub use pg_health_repository::PgDatabaseHealth;
pub use pg_log_repository::PgLogRepository;
pub use pg_threat_repository::PgThreatRepository;
