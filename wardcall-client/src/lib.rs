pub mod config;
pub mod media;
pub mod session;
pub mod signaling;
pub mod state;

pub use config::SessionConfig;
pub use media::{MediaSource, SyntheticMedia};
pub use session::PeerSession;
pub use signaling::{HttpSignaling, SignalingChannel, SignalingError};
pub use state::{PeerRole, SessionState};
