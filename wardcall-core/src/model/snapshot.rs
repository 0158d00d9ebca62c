use crate::model::candidate::IceCandidate;
use crate::model::description::SessionDescription;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Full signaling state of one room as returned by the room resource.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub offer: Option<SessionDescription>,
    pub answer: Option<SessionDescription>,
    pub candidates: Vec<IceCandidate>,
}
