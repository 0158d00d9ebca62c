use crate::store::RoomStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Periodically reclaim rooms whose parties stopped signaling without
/// calling teardown. Runs until the returned handle is dropped or aborted.
pub fn spawn_sweeper(store: RoomStore, ttl: Duration, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "room sweeper running (ttl {:?}, every {:?})",
            ttl, interval
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let removed = store.sweep(ttl);
            if removed > 0 {
                info!("swept {} idle room(s), {} remain", removed, store.len());
            }
        }
    })
}
