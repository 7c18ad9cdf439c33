//! Threat entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Severities accepted for new threats.
pub const SEVERITIES: [&str; 4] = ["low", "medium", "high", "critical"];

/// A detected security threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: i64,
    pub threat_type: String,
    pub severity: String,
    pub status: String,
    pub source_ip: Option<String>,
    pub target_ip: Option<String>,
    pub description: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Input data for recording a new threat.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewThreat {
    #[validate(length(min = 1, max = 64))]
    pub threat_type: String,

    #[validate(custom(function = "validate_severity"))]
    pub severity: String,

    #[validate(ip)]
    pub source_ip: Option<String>,

    #[validate(ip)]
    pub target_ip: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

fn validate_severity(severity: &str) -> Result<(), ValidationError> {
    if SEVERITIES.contains(&severity) {
        Ok(())
    } else {
        Err(ValidationError::new("severity")
            .with_message("must be one of: low, medium, high, critical".into()))
    }
}

/// Threat counts for one (type, severity) pair over the last 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatStat {
    pub threat_type: String,
    pub severity: String,
    pub count: i64,
    pub resolved_count: i64,
}
