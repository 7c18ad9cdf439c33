//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Request bodies
//! that carry domain input are validated with `validator` in the service layer.

pub mod cache;
pub mod dashboard;
pub mod health;
pub mod logs;
pub mod threat;

use serde::Serialize;

use crate::application::services::{Cached, Source};

/// Query result tagged with where it was served from.
///
/// ```json
/// { "data": [...], "source": "cache" }
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub source: Source,
}

impl<T> From<Cached<T>> for DataResponse<T> {
    fn from(cached: Cached<T>) -> Self {
        Self {
            data: cached.data,
            source: cached.source,
        }
    }
}
