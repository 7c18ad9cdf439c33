//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the [`services::QueryCache`], and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::QueryCache`] - Cache-aside reads and invalidation
//! - [`services::ThreatService`] - Threat lists, statistics and creation
//! - [`services::LogService`] - Recent security logs
//! - [`services::DashboardService`] - Aggregated dashboard counters

pub mod services;
