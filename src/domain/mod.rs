//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures served by the API
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Caching is an application concern (see
//! [`crate::application::services::QueryCache`]).

pub mod entities;
pub mod repositories;
