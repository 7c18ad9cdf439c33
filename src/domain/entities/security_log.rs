//! Security log entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the security event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityLog {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub log_level: String,
    pub source: String,
    pub event_type: String,
    pub source_ip: Option<String>,
    pub message: String,
    pub metadata: Option<Value>,
}
