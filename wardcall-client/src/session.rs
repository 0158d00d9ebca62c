use anyhow::{Context, Result, bail};
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_remote::TrackRemote;

use wardcall_core::{IceCandidate, RoomId, SessionDescription, SignalError};

use crate::config::SessionConfig;
use crate::media::MediaSource;
use crate::signaling::{SignalingChannel, SignalingError};
use crate::state::{PeerRole, SessionState};

/// One party's side of a call: owns the peer connection, walks the
/// signaling state machine against the room store, and keeps polling
/// candidates until teardown.
pub struct PeerSession {
    room_id: RoomId,
    signaling: Arc<dyn SignalingChannel>,
    media: Arc<dyn MediaSource>,
    config: SessionConfig,
    peer_connection: Arc<RTCPeerConnection>,
    state_tx: watch::Sender<SessionState>,
    state_rx: watch::Receiver<SessionState>,
    role: OnceLock<PeerRole>,
    candidate_poller: Mutex<Option<JoinHandle<()>>>,
    remote_tracks: Mutex<Option<mpsc::UnboundedReceiver<Arc<TrackRemote>>>>,
}

impl PeerSession {
    /// Set up the peer connection and its callbacks. The session stays in
    /// `Initializing` until `join` drives the exchange.
    pub async fn new(
        room_id: RoomId,
        signaling: Arc<dyn SignalingChannel>,
        media: Arc<dyn MediaSource>,
        config: SessionConfig,
    ) -> Result<Arc<Self>> {
        let peer_connection = build_peer_connection(&config).await?;
        let (state_tx, state_rx) = watch::channel(SessionState::Initializing);
        let (track_tx, track_rx) = mpsc::unbounded_channel();

        let session = Arc::new(Self {
            room_id,
            signaling,
            media,
            config,
            peer_connection,
            state_tx,
            state_rx,
            role: OnceLock::new(),
            candidate_poller: Mutex::new(None),
            remote_tracks: Mutex::new(Some(track_rx)),
        });
        session.register_callbacks(track_tx);

        Ok(session)
    }

    /// Drive the signaling exchange to the point where both descriptions
    /// are in place and candidate polling is running. Errors are mirrored
    /// into a terminal `Failed` state.
    pub async fn join(&self) -> Result<()> {
        match self.drive().await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.fail(&format!("{e:#}"));
                Err(e)
            }
        }
    }

    async fn drive(&self) -> Result<()> {
        self.set_state(SessionState::AcquiringMedia);
        let tracks = self
            .media
            .open_tracks()
            .await
            .context("failed to initialize media")?;
        for track in tracks {
            self.peer_connection
                .add_track(track)
                .await
                .context("failed to initialize media")?;
        }

        self.set_state(SessionState::JoiningRoom);
        let existing = self
            .signaling
            .fetch_offer(&self.room_id)
            .await
            .context("signaling unavailable")?;
        match existing {
            None => self.offer_leg().await?,
            Some(offer) => self.answer_leg(offer).await?,
        }

        let poller = self.spawn_candidate_poller();
        *self.candidate_poller.lock().await = Some(poller);
        Ok(())
    }

    /// First arrival: publish an offer, then poll for the answer.
    async fn offer_leg(&self) -> Result<()> {
        self.set_state(SessionState::Offering);
        let offer = self.peer_connection.create_offer(None).await?;

        let published = self
            .signaling
            .publish_offer(&self.room_id, SessionDescription::offer(offer.sdp.clone()))
            .await;
        match published {
            Ok(()) => {}
            Err(SignalingError::Signal(SignalError::OfferAlreadySet(_))) => {
                // Lost the arrival race: the other party's offer landed
                // first, so this side answers it instead.
                debug!(
                    "offer slot in room {} already taken, switching to answering",
                    self.room_id
                );
                let offer = self
                    .signaling
                    .fetch_offer(&self.room_id)
                    .await?
                    .context("offer disappeared after losing the join race")?;
                return self.answer_leg(offer).await;
            }
            Err(e) => return Err(e.into()),
        }

        let _ = self.role.set(PeerRole::Offerer);
        self.peer_connection.set_local_description(offer).await?;

        self.set_state(SessionState::AwaitingRemoteDescription);
        let answer = self.poll_for_answer().await?;
        let remote = RTCSessionDescription::answer(answer.sdp)?;
        self.peer_connection.set_remote_description(remote).await?;
        Ok(())
    }

    /// Second arrival: apply the stored offer and publish the answer.
    async fn answer_leg(&self, offer: SessionDescription) -> Result<()> {
        let _ = self.role.set(PeerRole::Answerer);
        self.set_state(SessionState::Answering);

        let remote = RTCSessionDescription::offer(offer.sdp)?;
        self.peer_connection.set_remote_description(remote).await?;

        let answer = self.peer_connection.create_answer(None).await?;
        let sdp = answer.sdp.clone();
        self.peer_connection.set_local_description(answer).await?;
        self.signaling
            .publish_answer(&self.room_id, SessionDescription::answer(sdp))
            .await?;

        self.set_state(SessionState::AwaitingRemoteDescription);
        Ok(())
    }

    async fn poll_for_answer(&self) -> Result<SessionDescription> {
        for attempt in 1..=self.config.answer_poll_attempts {
            tokio::time::sleep(self.config.answer_poll_interval).await;
            match self.signaling.fetch_answer(&self.room_id).await {
                Ok(Some(answer)) => {
                    debug!("answer observed after {attempt} poll(s)");
                    return Ok(answer);
                }
                Ok(None) => {}
                // Transient fetch trouble counts against the ceiling but
                // does not abort the wait.
                Err(e) => debug!("answer poll failed: {e}"),
            }
        }
        bail!("peer did not join")
    }

    /// Fetch and apply remote candidates until the session is torn down.
    /// A candidate that fails to apply is dropped, not retried.
    fn spawn_candidate_poller(&self) -> JoinHandle<()> {
        let signaling = self.signaling.clone();
        let room_id = self.room_id.clone();
        let peer_connection = self.peer_connection.clone();
        let interval = self.config.candidate_poll_interval;

        tokio::spawn(async move {
            let mut cursor = 0usize;
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let batch = match signaling.fetch_candidates(&room_id, cursor).await {
                    Ok(batch) => batch,
                    Err(e) => {
                        debug!("candidate poll failed: {e}");
                        continue;
                    }
                };
                cursor = batch.next;
                for candidate in batch.candidates {
                    let init = RTCIceCandidateInit {
                        candidate: candidate.candidate,
                        sdp_mid: candidate.sdp_mid,
                        sdp_mline_index: candidate.sdp_m_line_index,
                        username_fragment: candidate.username_fragment,
                    };
                    if let Err(e) = peer_connection.add_ice_candidate(init).await {
                        debug!("dropping candidate that failed to apply: {e}");
                    }
                }
            }
        })
    }

    fn register_callbacks(&self, track_tx: mpsc::UnboundedSender<Arc<TrackRemote>>) {
        // Trickle: publish local candidates as they are gathered.
        let signaling = self.signaling.clone();
        let room_id = self.room_id.clone();
        self.peer_connection
            .on_ice_candidate(Box::new(move |candidate| {
                let signaling = signaling.clone();
                let room_id = room_id.clone();
                Box::pin(async move {
                    let Some(candidate) = candidate else { return };
                    let Ok(init) = candidate.to_json() else { return };
                    let payload = IceCandidate {
                        candidate: init.candidate,
                        sdp_mid: init.sdp_mid,
                        sdp_m_line_index: init.sdp_mline_index,
                        username_fragment: init.username_fragment,
                    };
                    if let Err(e) = signaling.publish_candidate(&room_id, payload).await {
                        debug!("failed to publish ICE candidate: {e}");
                    }
                })
            }));

        let state_tx = self.state_tx.clone();
        self.peer_connection
            .on_peer_connection_state_change(Box::new(move |s: RTCPeerConnectionState| {
                let state_tx = state_tx.clone();
                Box::pin(async move {
                    info!("peer connection state: {s}");
                    match s {
                        RTCPeerConnectionState::Connected => {
                            let _ = state_tx.send(SessionState::Connected);
                        }
                        RTCPeerConnectionState::Failed => {
                            let _ = state_tx.send(SessionState::Failed("connection failed".into()));
                        }
                        _ => {}
                    }
                })
            }));

        self.peer_connection
            .on_track(Box::new(move |track, _receiver, _transceiver| {
                let track_tx = track_tx.clone();
                Box::pin(async move {
                    info!("remote {} track received", track.kind());
                    let _ = track_tx.send(track);
                })
            }));
    }

    /// Tear the call down: stop polling, delete the room, release media.
    /// The only teardown path; either party may call it.
    pub async fn hang_up(&self) -> Result<()> {
        if let Some(task) = self.candidate_poller.lock().await.take() {
            task.abort();
        }
        if let Err(e) = self.signaling.delete_room(&self.room_id).await {
            warn!("room teardown request failed: {e}");
        }
        self.peer_connection.close().await?;
        Ok(())
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Watch state transitions, e.g. to wait for `Connected`.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// `None` until role assignment resolves during `join`.
    pub fn role(&self) -> Option<PeerRole> {
        self.role.get().copied()
    }

    /// Remote tracks as they arrive; consumable once.
    pub async fn take_remote_tracks(&self) -> Option<mpsc::UnboundedReceiver<Arc<TrackRemote>>> {
        self.remote_tracks.lock().await.take()
    }

    fn set_state(&self, state: SessionState) {
        debug!("session state: {state}");
        let _ = self.state_tx.send(state);
    }

    fn fail(&self, reason: &str) {
        let _ = self.state_tx.send(SessionState::Failed(reason.to_string()));
    }
}

async fn build_peer_connection(config: &SessionConfig) -> Result<Arc<RTCPeerConnection>> {
    let mut media_engine = MediaEngine::default();
    media_engine.register_default_codecs()?;
    let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

    let api = APIBuilder::new()
        .with_media_engine(media_engine)
        .with_interceptor_registry(registry)
        .build();

    let ice_servers = config
        .ice_servers
        .iter()
        .map(|server| RTCIceServer {
            urls: server.urls.clone(),
            username: server.username.clone().unwrap_or_default(),
            credential: server.credential.clone().unwrap_or_default(),
        })
        .collect();
    let rtc_config = RTCConfiguration {
        ice_servers,
        ..Default::default()
    };

    Ok(Arc::new(api.new_peer_connection(rtc_config).await?))
}
