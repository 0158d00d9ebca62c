use crate::store::room::Room;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use wardcall_core::{
    CandidateBatch, IceCandidate, RoomId, RoomSnapshot, SessionDescription, SignalError,
};

/// Keyed store of per-room signaling state.
///
/// All mutations go through the per-key dashmap entry, which makes the
/// offer write an atomic create-or-reject: of two racing first arrivals,
/// exactly one offer lands and the loser observes `OfferAlreadySet`.
#[derive(Clone, Default)]
pub struct RoomStore {
    rooms: Arc<DashMap<RoomId, Room>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the offer, creating the room if it does not exist yet.
    pub fn put_offer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalError> {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut slot) => {
                let room = slot.get_mut();
                if room.offer.is_some() {
                    return Err(SignalError::OfferAlreadySet(room_id.clone()));
                }
                room.offer = Some(description);
                room.touch();
                Ok(())
            }
            Entry::Vacant(slot) => {
                info!("creating room {}", room_id);
                let mut room = Room::new();
                room.offer = Some(description);
                slot.insert(room);
                Ok(())
            }
        }
    }

    /// Store the answer for an existing room.
    pub fn put_answer(
        &self,
        room_id: &RoomId,
        description: SessionDescription,
    ) -> Result<(), SignalError> {
        let Some(mut room) = self.rooms.get_mut(room_id) else {
            return Err(SignalError::RoomNotFound(room_id.clone()));
        };
        if room.answer.is_some() {
            return Err(SignalError::AnswerAlreadySet(room_id.clone()));
        }
        room.answer = Some(description);
        room.touch();
        Ok(())
    }

    /// Absent (never an error) for unknown rooms or an unset slot.
    pub fn offer(&self, room_id: &RoomId) -> Option<SessionDescription> {
        self.rooms.get(room_id).and_then(|room| room.offer.clone())
    }

    pub fn answer(&self, room_id: &RoomId) -> Option<SessionDescription> {
        self.rooms.get(room_id).and_then(|room| room.answer.clone())
    }

    /// Append one candidate to the room's ordered list. No deduplication.
    pub fn push_candidate(
        &self,
        room_id: &RoomId,
        candidate: IceCandidate,
    ) -> Result<(), SignalError> {
        let Some(mut room) = self.rooms.get_mut(room_id) else {
            return Err(SignalError::RoomNotFound(room_id.clone()));
        };
        room.candidates.push(candidate);
        room.touch();
        Ok(())
    }

    /// The suffix of the candidate list starting at `since`, plus the
    /// cursor for the following poll. Unknown rooms yield an empty batch
    /// with the cursor unchanged, so pollers stay quiet after teardown.
    pub fn candidates_since(&self, room_id: &RoomId, since: usize) -> CandidateBatch {
        let Some(room) = self.rooms.get(room_id) else {
            return CandidateBatch::empty(since);
        };
        let from = since.min(room.candidates.len());
        CandidateBatch {
            candidates: room.candidates[from..].to_vec(),
            next: room.candidates.len(),
        }
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Result<RoomSnapshot, SignalError> {
        let Some(room) = self.rooms.get(room_id) else {
            return Err(SignalError::RoomNotFound(room_id.clone()));
        };
        Ok(RoomSnapshot {
            room_id: room_id.clone(),
            offer: room.offer.clone(),
            answer: room.answer.clone(),
            candidates: room.candidates.clone(),
        })
    }

    /// Remove all state for the room. Idempotent.
    pub fn remove(&self, room_id: &RoomId) {
        if self.rooms.remove(room_id).is_some() {
            info!("removed room {}", room_id);
        }
    }

    /// Drop rooms idle longer than `ttl`. Returns how many were removed.
    pub fn sweep(&self, ttl: Duration) -> usize {
        let mut removed = 0;
        self.rooms.retain(|room_id, room| {
            if room.idle_for() > ttl {
                debug!("sweeping idle room {} (age {:?})", room_id, room.age());
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
