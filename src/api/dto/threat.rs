//! DTOs for threat endpoints.

use serde::Deserialize;

use crate::domain::entities::NewThreat;

/// Request body for `POST /api/threats`.
#[derive(Debug, Deserialize)]
pub struct CreateThreatRequest {
    pub threat_type: String,
    pub severity: String,
    pub source_ip: Option<String>,
    pub target_ip: Option<String>,
    pub description: Option<String>,
}

impl From<CreateThreatRequest> for NewThreat {
    fn from(request: CreateThreatRequest) -> Self {
        NewThreat {
            threat_type: request.threat_type.trim().to_string(),
            severity: request.severity.trim().to_lowercase(),
            source_ip: non_empty(request.source_ip),
            target_ip: non_empty(request.target_ip),
            description: non_empty(request.description),
        }
    }
}

/// Treats blank optional fields as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalization() {
        let request: CreateThreatRequest = serde_json::from_str(
            r#"{
                "threat_type": " brute_force ",
                "severity": "HIGH",
                "source_ip": "",
                "target_ip": " 10.0.0.1 "
            }"#,
        )
        .unwrap();

        let new_threat = NewThreat::from(request);
        assert_eq!(new_threat.threat_type, "brute_force");
        assert_eq!(new_threat.severity, "high");
        assert_eq!(new_threat.source_ip, None);
        assert_eq!(new_threat.target_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(new_threat.description, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result = serde_json::from_str::<CreateThreatRequest>(r#"{"severity": "low"}"#);
        assert!(result.is_err());
    }
}
