use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use wardcall_core::{
    CandidateBatch, IceCandidate, IceServerConfig, RoomId, SessionDescription, SignalError,
};

/// Signaling failures as seen by the client. Protocol errors (missing
/// room, fail-closed slot) are kept apart from transport trouble so the
/// session can react to conflicts, e.g. by switching roles.
#[derive(Debug, Error)]
pub enum SignalingError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("signaling transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SignalingError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Transport seam between the peer session and the room store. The
/// production impl speaks the REST surface; tests drive the store directly.
#[async_trait]
pub trait SignalingChannel: Send + Sync {
    async fn fetch_offer(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<SessionDescription>, SignalingError>;

    async fn publish_offer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalingError>;

    async fn fetch_answer(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<SessionDescription>, SignalingError>;

    async fn publish_answer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalingError>;

    async fn publish_candidate(
        &self,
        room_id: &RoomId,
        candidate: IceCandidate,
    ) -> Result<(), SignalingError>;

    async fn fetch_candidates(
        &self,
        room_id: &RoomId,
        since: usize,
    ) -> Result<CandidateBatch, SignalingError>;

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), SignalingError>;
}

/// REST client for the wardcall signaling server.
pub struct HttpSignaling {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSignaling {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn room_url(&self, room_id: &RoomId) -> String {
        format!("{}/rooms/{}", self.base_url, room_id)
    }

    /// Fetch the STUN/TURN list the server hands out to its clients.
    pub async fn fetch_ice_config(&self) -> Result<Vec<IceServerConfig>, SignalingError> {
        let response = self
            .client
            .get(format!("{}/ice-config", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_description(
        &self,
        url: String,
    ) -> Result<Option<SessionDescription>, SignalingError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn check_write(
        status: StatusCode,
        room_id: &RoomId,
        on_conflict: fn(RoomId) -> SignalError,
    ) -> Result<(), SignalingError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(SignalError::RoomNotFound(room_id.clone()).into()),
            StatusCode::CONFLICT => Err(on_conflict(room_id.clone()).into()),
            s => Err(SignalingError::Transport(format!("unexpected status {s}"))),
        }
    }
}

#[async_trait]
impl SignalingChannel for HttpSignaling {
    async fn fetch_offer(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<SessionDescription>, SignalingError> {
        self.fetch_description(format!("{}/offer", self.room_url(room_id)))
            .await
    }

    async fn publish_offer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalingError> {
        let response = self
            .client
            .post(format!("{}/offer", self.room_url(room_id)))
            .json(&description)
            .send()
            .await?;
        Self::check_write(response.status(), room_id, SignalError::OfferAlreadySet)
    }

    async fn fetch_answer(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<SessionDescription>, SignalingError> {
        self.fetch_description(format!("{}/answer", self.room_url(room_id)))
            .await
    }

    async fn publish_answer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalingError> {
        let response = self
            .client
            .post(format!("{}/answer", self.room_url(room_id)))
            .json(&description)
            .send()
            .await?;
        Self::check_write(response.status(), room_id, SignalError::AnswerAlreadySet)
    }

    async fn publish_candidate(
        &self,
        room_id: &RoomId,
        candidate: IceCandidate,
    ) -> Result<(), SignalingError> {
        let response = self
            .client
            .post(format!("{}/candidates", self.room_url(room_id)))
            .json(&candidate)
            .send()
            .await?;
        // A missing room here means the call was torn down under us.
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(SignalError::RoomNotFound(room_id.clone()).into()),
            s => Err(SignalingError::Transport(format!("unexpected status {s}"))),
        }
    }

    async fn fetch_candidates(
        &self,
        room_id: &RoomId,
        since: usize,
    ) -> Result<CandidateBatch, SignalingError> {
        let response = self
            .client
            .get(format!("{}/candidates?since={since}", self.room_url(room_id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), SignalingError> {
        self.client
            .delete(self.room_url(room_id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
