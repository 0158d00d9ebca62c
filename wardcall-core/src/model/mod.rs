mod candidate;
mod description;
mod error;
mod ice_config;
mod room;
mod snapshot;

pub use candidate::{CandidateBatch, IceCandidate};
pub use description::{SdpKind, SessionDescription};
pub use error::SignalError;
pub use ice_config::IceServerConfig;
pub use room::RoomId;
pub use snapshot::RoomSnapshot;
