use serde::{Deserialize, Serialize};

/// One ICE candidate as announced by a peer. Field names follow the
/// browser's `RTCIceCandidateInit` shape so payloads pass through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

/// A slice of a room's candidate list starting at the `since` cursor the
/// consumer sent. `next` is the cursor to use on the following poll.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CandidateBatch {
    pub candidates: Vec<IceCandidate>,
    pub next: usize,
}

impl CandidateBatch {
    pub fn empty(next: usize) -> Self {
        Self {
            candidates: Vec::new(),
            next,
        }
    }
}
