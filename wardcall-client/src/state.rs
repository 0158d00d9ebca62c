use std::fmt;

/// Progress of one peer session through the signaling exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    AcquiringMedia,
    JoiningRoom,
    Offering,
    Answering,
    AwaitingRemoteDescription,
    Connected,
    Failed(String),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Connected | SessionState::Failed(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Initializing => write!(f, "initializing"),
            SessionState::AcquiringMedia => write!(f, "acquiring media"),
            SessionState::JoiningRoom => write!(f, "joining room"),
            SessionState::Offering => write!(f, "offering"),
            SessionState::Answering => write!(f, "answering"),
            SessionState::AwaitingRemoteDescription => write!(f, "awaiting remote description"),
            SessionState::Connected => write!(f, "connected"),
            SessionState::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Determined by arrival order: whoever finds no offer in the room offers,
/// the second party answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerRole {
    Offerer,
    Answerer,
}
