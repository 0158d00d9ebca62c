use reqwest::StatusCode;
use wardcall_core::{CandidateBatch, IceCandidate, SessionDescription};

use crate::utils::{init_tracing, spawn_server};

#[tokio::test]
async fn candidate_list_grows_monotonically() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();
    let room = format!("{base}/rooms/consult-ice");

    client
        .post(format!("{room}/offer"))
        .json(&SessionDescription::offer("offer"))
        .send()
        .await
        .unwrap();

    let mut last_len = 0;
    for n in 0..4 {
        let accepted = client
            .post(format!("{room}/candidates"))
            .json(&IceCandidate::new(format!("candidate:{n}")))
            .send()
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::ACCEPTED);

        let batch: CandidateBatch = client
            .get(format!("{room}/candidates"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(batch.candidates.len() > last_len);
        last_len = batch.candidates.len();
    }
}

#[tokio::test]
async fn since_cursor_returns_only_the_unseen_suffix() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();
    let room = format!("{base}/rooms/consult-cursor");

    client
        .post(format!("{room}/offer"))
        .json(&SessionDescription::offer("offer"))
        .send()
        .await
        .unwrap();

    for n in 0..3 {
        client
            .post(format!("{room}/candidates"))
            .json(&IceCandidate::new(format!("candidate:{n}")))
            .send()
            .await
            .unwrap();
    }

    let full: CandidateBatch = client
        .get(format!("{room}/candidates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(full.candidates.len(), 3);
    assert_eq!(full.next, 3);

    client
        .post(format!("{room}/candidates"))
        .json(&IceCandidate::new("candidate:late"))
        .send()
        .await
        .unwrap();

    let tail: CandidateBatch = client
        .get(format!("{room}/candidates?since={}", full.next))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tail.candidates.len(), 1);
    assert_eq!(tail.candidates[0].candidate, "candidate:late");
    assert_eq!(tail.next, 4);
}

#[tokio::test]
async fn candidate_without_room_is_not_found() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/rooms/nobody/candidates"))
        .json(&IceCandidate::new("candidate:0"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
