//! Background task driving the cache connection state machine.

use super::connection::{ConnectionEvent, ConnectionMonitor, ConnectionState};
use super::service::{CacheError, CacheResult, CacheStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{error, warn};

/// Reconnect and health-check settings for the supervisor.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    /// Consecutive failed attempts tolerated before giving up.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles afterwards.
    pub base_delay: Duration,
    /// Upper bound of a single backoff delay.
    pub max_delay: Duration,
    /// Interval between PINGs while connected.
    pub health_interval: Duration,
    /// Bound on a single connect or PING call.
    pub connect_timeout: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(3),
            health_interval: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

impl ReconnectPolicy {
    /// Delays between attempts: `base, 2*base, 4*base, ...` capped at `max_delay`.
    pub fn backoff(&self) -> impl Iterator<Item = Duration> + use<> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let max_delay = self.max_delay;
        // The strategy yields factor * 2^n starting at n = 1.
        let doubled = ExponentialBackoff::from_millis(2)
            .factor(base_ms)
            .max_delay(max_delay);
        std::iter::once(self.base_delay)
            .chain(doubled)
            .map(move |delay| delay.min(max_delay))
    }
}

async fn bounded<T>(
    limit: Duration,
    operation: impl Future<Output = CacheResult<T>>,
) -> CacheResult<T> {
    tokio::time::timeout(limit, operation)
        .await
        .unwrap_or(Err(CacheError::Timeout))
}

/// Keeps the cache connected for the lifetime of the process.
///
/// # Loop
///
/// 1. Connect; on failure feed `Failed` to the monitor and sleep the next
///    backoff delay
/// 2. Once connected, PING every `health_interval`
/// 3. A failed PING feeds `Lost` and returns to step 1
///
/// Returns when the monitor reaches [`ConnectionState::GaveUp`]. The task is
/// aborted on shutdown by [`crate::application::services::QueryCache::close`].
pub async fn supervise(
    store: Arc<dyn CacheStore>,
    monitor: Arc<ConnectionMonitor>,
    policy: ReconnectPolicy,
) {
    loop {
        monitor.apply(ConnectionEvent::Connect);
        let mut delays = policy.backoff();

        loop {
            match bounded(policy.connect_timeout, store.connect()).await {
                Ok(()) => {
                    monitor.apply(ConnectionEvent::Established);
                    break;
                }
                Err(e) => {
                    let state = monitor.apply(ConnectionEvent::Failed);
                    if state == ConnectionState::GaveUp {
                        error!("Cache connection failed: {}. Giving up", e);
                        return;
                    }

                    let delay = delays.next().unwrap_or(policy.max_delay);
                    warn!(
                        state = state.label(),
                        delay_ms = delay.as_millis() as u64,
                        "Cache connection failed: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        loop {
            tokio::time::sleep(policy.health_interval).await;

            if let Err(e) = bounded(policy.connect_timeout, store.ping()).await {
                warn!("Cache PING failed: {}", e);
                monitor.apply(ConnectionEvent::Lost);
                break;
            }
        }
    }
}
