use std::sync::Arc;
use std::time::Duration;

use wardcall_client::{PeerSession, SessionConfig, SessionState, SyntheticMedia};
use wardcall_core::RoomId;
use wardcall_server::RoomStore;

use crate::utils::{BrokenMedia, StoreSignaling, fast_config, init_tracing};

#[tokio::test]
async fn offerer_gives_up_after_the_bounded_attempt_count() {
    init_tracing();

    let store = RoomStore::new();
    let room_id = RoomId::from("consult-lonely");
    let config = SessionConfig {
        answer_poll_interval: Duration::from_millis(30),
        answer_poll_attempts: 3,
        ..fast_config()
    };

    let session = PeerSession::new(
        room_id.clone(),
        Arc::new(StoreSignaling::new(store.clone())),
        Arc::new(SyntheticMedia),
        config,
    )
    .await
    .expect("session");

    let err = session.join().await.expect_err("nobody ever answers");

    assert!(format!("{err:#}").contains("peer did not join"));
    assert!(
        matches!(session.state(), SessionState::Failed(reason) if reason.contains("peer did not join"))
    );

    // The abandoned offer is still there for the sweeper to reclaim.
    assert!(store.offer(&room_id).is_some());
}

#[tokio::test]
async fn media_failure_is_terminal_and_touches_nothing() {
    init_tracing();

    let store = RoomStore::new();
    let room_id = RoomId::from("consult-no-camera");

    let session = PeerSession::new(
        room_id.clone(),
        Arc::new(StoreSignaling::new(store.clone())),
        Arc::new(BrokenMedia),
        fast_config(),
    )
    .await
    .expect("session");

    let err = session.join().await.expect_err("media must fail");

    assert!(format!("{err:#}").contains("failed to initialize media"));
    assert!(matches!(session.state(), SessionState::Failed(_)));
    assert!(store.offer(&room_id).is_none());
    assert!(store.is_empty());
}
