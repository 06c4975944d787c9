//! Periodic application-level ping to every registered connection.
//!
//! Clients treat `{"type":"ping"}` as a keep-alive; a send that fails is
//! logged by the registry and the connection stays registered until its
//! socket task observes the close.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ConnectionRegistry;

/// Frame sent on every heartbeat tick.
pub const PING_FRAME: &str = r#"{"type":"ping"}"#;

/// Spawns the heartbeat loop.
///
/// The first ping goes out one full `interval` after spawning. Abort the
/// returned handle to stop it.
#[must_use]
pub fn spawn_heartbeat(registry: Arc<ConnectionRegistry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let sent = registry.broadcast(PING_FRAME).await;
            tracing::trace!(sent, "heartbeat");
        }
    })
}
