//! Cache keys and TTLs for cached queries.
//!
//! Keys follow `<resource>:<discriminator>`.

pub const THREATS_LATEST: &str = "threats:latest";
pub const THREATS_LATEST_TTL: u64 = 30;

pub const THREATS_STATS: &str = "threats:stats";
pub const THREATS_STATS_TTL: u64 = 60;

pub const DASHBOARD_METRICS: &str = "dashboard:metrics";
pub const DASHBOARD_METRICS_TTL: u64 = 45;

pub const LOGS_TTL: u64 = 15;

/// Key for the `limit` most recent security logs.
pub fn logs(limit: i64) -> String {
    format!("logs:{}", limit)
}

/// Keys derived from the threats table, invalidated whenever a threat is written.
pub const THREAT_DERIVED: [&str; 3] = [THREATS_LATEST, THREATS_STATS, DASHBOARD_METRICS];
