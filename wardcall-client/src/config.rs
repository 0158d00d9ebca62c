use std::time::Duration;
use wardcall_core::IceServerConfig;

/// Tunables for one peer session. The defaults match the one-second
/// polling cadence the signaling protocol was designed around.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ice_servers: Vec<IceServerConfig>,
    /// How often the offering party checks for the answer.
    pub answer_poll_interval: Duration,
    /// Poll ceiling before giving up on the peer ever joining.
    pub answer_poll_attempts: u32,
    /// How often both parties fetch the remote candidate list.
    pub candidate_poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ice_servers: Vec::new(),
            answer_poll_interval: Duration::from_secs(1),
            answer_poll_attempts: 30,
            candidate_poll_interval: Duration::from_secs(1),
        }
    }
}
