use reqwest::StatusCode;
use wardcall_core::{IceServerConfig, RoomSnapshot, SessionDescription};

use crate::utils::{init_tracing, spawn_server};

#[tokio::test]
async fn offer_round_trips_through_post_and_get() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();
    let offer = SessionDescription::offer("v=0\r\no=- 42 2 IN IP4 127.0.0.1");

    let created = client
        .post(format!("{base}/rooms/consult-1/offer"))
        .json(&offer)
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let fetched: Option<SessionDescription> = client
        .get(format!("{base}/rooms/consult-1/offer"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, Some(offer.clone()));

    let snapshot: RoomSnapshot = client
        .get(format!("{base}/rooms/consult-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot.offer, Some(offer));
    assert_eq!(snapshot.answer, None);
    assert!(snapshot.candidates.is_empty());
}

#[tokio::test]
async fn reads_on_unknown_room_are_absent_not_errors() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let offer = client
        .get(format!("{base}/rooms/ghost/offer"))
        .send()
        .await
        .unwrap();
    assert_eq!(offer.status(), StatusCode::OK);
    assert_eq!(offer.json::<Option<SessionDescription>>().await.unwrap(), None);

    let answer = client
        .get(format!("{base}/rooms/ghost/answer"))
        .send()
        .await
        .unwrap();
    assert_eq!(answer.status(), StatusCode::OK);
    assert_eq!(answer.json::<Option<SessionDescription>>().await.unwrap(), None);

    // The room resource itself does 404.
    let room = client
        .get(format!("{base}/rooms/ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(room.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_offer_and_second_answer_conflict() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();
    let room = format!("{base}/rooms/consult-2");

    client
        .post(format!("{room}/offer"))
        .json(&SessionDescription::offer("first"))
        .send()
        .await
        .unwrap();

    let second_offer = client
        .post(format!("{room}/offer"))
        .json(&SessionDescription::offer("second"))
        .send()
        .await
        .unwrap();
    assert_eq!(second_offer.status(), StatusCode::CONFLICT);

    client
        .post(format!("{room}/answer"))
        .json(&SessionDescription::answer("first"))
        .send()
        .await
        .unwrap();

    let second_answer = client
        .post(format!("{room}/answer"))
        .json(&SessionDescription::answer("second"))
        .send()
        .await
        .unwrap();
    assert_eq!(second_answer.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn answer_without_room_is_not_found() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/rooms/nobody/answer"))
        .json(&SessionDescription::answer("early"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent_and_reads_stay_absent() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();
    let room = format!("{base}/rooms/consult-3");

    client
        .post(format!("{room}/offer"))
        .json(&SessionDescription::offer("offer"))
        .send()
        .await
        .unwrap();

    let first = client.delete(&room).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let again = client.delete(&room).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::NO_CONTENT);

    let offer = client
        .get(format!("{room}/offer"))
        .send()
        .await
        .unwrap()
        .json::<Option<SessionDescription>>()
        .await
        .unwrap();
    assert_eq!(offer, None);

    let snapshot = client.get(&room).send().await.unwrap();
    assert_eq!(snapshot.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ice_config_serves_the_configured_servers() {
    init_tracing();
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let servers: Vec<IceServerConfig> = client
        .get(format!("{base}/ice-config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].urls, vec!["stun:stun.example.org:3478"]);
}
