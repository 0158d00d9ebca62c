use crate::model::room::RoomId;
use thiserror::Error;

/// Protocol-level signaling failures. Offer and answer slots are
/// fail-closed: once written they may not be replaced, so a stale or
/// racing writer gets a conflict instead of silently corrupting the
/// exchange.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum SignalError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("room {0} already has an offer")]
    OfferAlreadySet(RoomId),

    #[error("room {0} already has an answer")]
    AnswerAlreadySet(RoomId),
}
