//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ThreatRepository`] - Threat records, statistics and dashboard counters
//! - [`LogRepository`] - Security log entries
//! - [`DatabaseHealth`] - Database liveness probe

pub mod health_repository;
pub mod log_repository;
pub mod threat_repository;

pub use health_repository::DatabaseHealth;
pub use log_repository::LogRepository;
pub use threat_repository::ThreatRepository;

#[cfg(test)]
pub use health_repository::MockDatabaseHealth;
#[cfg(test)]
pub use log_repository::MockLogRepository;
#[cfg(test)]
pub use threat_repository::MockThreatRepository;
