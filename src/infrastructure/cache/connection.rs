//! Cache connection state machine.
//!
//! The state is a plain enum advanced by a pure transition function
//! ([`ConnectionState::on`]). [`ConnectionMonitor`] owns the current state and
//! is read synchronously by the cache-aside layer before every cache
//! operation; only the reconnect supervisor feeds it events.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

/// Lifecycle state of the cache connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    /// Not connected and not trying to connect.
    Disconnected,
    /// First connection attempt in progress.
    Connecting,
    /// Connected; the fast path is enabled.
    Ready,
    /// Connection lost or never established; `attempt` failed reconnects so far.
    Reconnecting { attempt: u32 },
    /// Reconnect attempts exhausted. Terminal for the process lifetime.
    GaveUp,
}

/// Inputs to the connection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A connection attempt starts.
    Connect,
    /// The backend answered.
    Established,
    /// A connection attempt failed.
    Failed,
    /// A previously ready connection stopped answering.
    Lost,
    /// The host process is shutting the cache down.
    Closed,
}

impl ConnectionState {
    /// Returns the state reached from `self` on `event`.
    ///
    /// `max_attempts` is the number of consecutive failed attempts tolerated
    /// before giving up.
    pub fn on(self, event: ConnectionEvent, max_attempts: u32) -> Self {
        use self::ConnectionEvent as E;
        use self::ConnectionState as S;

        match (self, event) {
            (S::GaveUp, E::Closed) => S::Disconnected,
            (S::GaveUp, _) => S::GaveUp,
            (_, E::Closed) => S::Disconnected,

            (S::Disconnected, E::Connect) => S::Connecting,
            (S::Connecting | S::Reconnecting { .. }, E::Established) => S::Ready,

            (S::Connecting, E::Failed) => {
                S::Reconnecting { attempt: 0 }.on(E::Failed, max_attempts)
            }
            (S::Reconnecting { attempt }, E::Failed) => {
                let attempt = attempt.saturating_add(1);
                if attempt > max_attempts {
                    S::GaveUp
                } else {
                    S::Reconnecting { attempt }
                }
            }

            (S::Ready, E::Lost | E::Failed) => S::Reconnecting { attempt: 0 },

            (state, _) => state,
        }
    }

    /// Whether cache operations should be attempted.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Short label for logs and health output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Reconnecting { .. } => "reconnecting",
            Self::GaveUp => "gave_up",
        }
    }
}

/// Shared holder of the current [`ConnectionState`].
pub struct ConnectionMonitor {
    state: watch::Sender<ConnectionState>,
    max_attempts: u32,
}

impl ConnectionMonitor {
    /// Creates a monitor in [`ConnectionState::Disconnected`].
    pub fn new(max_attempts: u32) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            state,
            max_attempts,
        }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Feeds `event` to the state machine and returns the new state.
    pub fn apply(&self, event: ConnectionEvent) -> ConnectionState {
        let mut next = ConnectionState::Disconnected;
        self.state.send_modify(|state| {
            let previous = *state;
            *state = previous.on(event, self.max_attempts);
            next = *state;

            if previous != next {
                match next {
                    ConnectionState::Ready => {
                        info!(from = previous.label(), "Cache connection ready")
                    }
                    ConnectionState::GaveUp => warn!(
                        max_attempts = self.max_attempts,
                        "Cache reconnect attempts exhausted, running without cache"
                    ),
                    _ => info!(
                        from = previous.label(),
                        to = next.label(),
                        "Cache connection state changed"
                    ),
                }
            }
        });
        next
    }
}
