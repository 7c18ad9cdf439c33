//! Recovered cache faults.
//!
//! Cache failures never fail a request. Each one the cache-aside layer absorbs
//! is turned into a [`CacheFault`] and handed to a [`FaultReporter`], keeping
//! the classification available to tests and metrics instead of buried in
//! log text.

use super::service::CacheError;
use std::fmt;
use tracing::warn;

/// Cache operation during which a fault occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOperation {
    Get,
    Set,
    Delete,
    Ping,
}

impl CacheOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
            Self::Ping => "ping",
        }
    }
}

/// Classification of a recovered fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The operation exceeded the cache operation timeout.
    Timeout,
    /// The backend returned an error (connection refused, protocol error, ...).
    Backend,
    /// A cached value could not be decoded, or a result could not be encoded.
    Serialization,
}

impl FaultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Backend => "backend",
            Self::Serialization => "serialization",
        }
    }
}

/// A cache failure that was absorbed instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFault {
    pub operation: CacheOperation,
    pub key: Option<String>,
    pub kind: FaultKind,
    pub detail: String,
}

impl CacheFault {
    pub fn new(
        operation: CacheOperation,
        key: Option<&str>,
        kind: FaultKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            key: key.map(str::to_string),
            kind,
            detail: detail.into(),
        }
    }

    /// Classifies a [`CacheError`] raised by a store operation.
    pub fn from_error(operation: CacheOperation, key: Option<&str>, error: &CacheError) -> Self {
        let kind = match error {
            CacheError::Timeout => FaultKind::Timeout,
            _ => FaultKind::Backend,
        };
        Self::new(operation, key, kind, error.to_string())
    }
}

impl fmt::Display for CacheFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cache {} {} fault",
            self.operation.as_str(),
            self.kind.as_str()
        )?;
        if let Some(key) = &self.key {
            write!(f, " on {}", key)?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Receives recovered cache faults.
pub trait FaultReporter: Send + Sync {
    fn report(&self, fault: CacheFault);
}

/// Reports faults as structured `WARN` events and `cache_faults_total` counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultReporter;

impl FaultReporter for TracingFaultReporter {
    fn report(&self, fault: CacheFault) {
        warn!(
            operation = fault.operation.as_str(),
            kind = fault.kind.as_str(),
            key = fault.key.as_deref().unwrap_or(""),
            detail = %fault.detail,
            "Recovered cache fault"
        );

        metrics::counter!(
            "cache_faults_total",
            "operation" => fault.operation.as_str(),
            "kind" => fault.kind.as_str()
        )
        .increment(1);
    }
}
