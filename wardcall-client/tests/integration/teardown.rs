use std::sync::Arc;

use wardcall_client::{PeerSession, SyntheticMedia};
use wardcall_core::RoomId;
use wardcall_server::RoomStore;

use crate::utils::{StoreSignaling, fast_config, init_tracing, wait_for_offer};

#[tokio::test]
async fn hang_up_removes_the_room_and_reads_stay_absent() {
    init_tracing();

    let store = RoomStore::new();
    let signaling = Arc::new(StoreSignaling::new(store.clone()));
    let room_id = RoomId::from("consult-bye");

    let offerer = PeerSession::new(
        room_id.clone(),
        signaling.clone(),
        Arc::new(SyntheticMedia),
        fast_config(),
    )
    .await
    .expect("offerer session");
    let offerer_join = {
        let session = offerer.clone();
        tokio::spawn(async move { session.join().await })
    };

    wait_for_offer(&store, &room_id).await;

    let answerer = PeerSession::new(
        room_id.clone(),
        signaling.clone(),
        Arc::new(SyntheticMedia),
        fast_config(),
    )
    .await
    .expect("answerer session");
    answerer.join().await.expect("answering join");
    offerer_join
        .await
        .expect("join task")
        .expect("offering join");

    // Either party may end the call; the other's teardown is a no-op.
    answerer.hang_up().await.expect("answerer hang up");

    assert!(store.offer(&room_id).is_none());
    assert!(store.answer(&room_id).is_none());
    assert!(store.candidates_since(&room_id, 0).candidates.is_empty());
    assert!(store.snapshot(&room_id).is_err());

    offerer.hang_up().await.expect("offerer hang up");
    assert!(store.snapshot(&room_id).is_err());
}
