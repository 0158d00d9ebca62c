use std::time::{Duration, Instant};
use wardcall_core::{IceCandidate, SessionDescription};

/// Signaling state retained for one call room. Created implicitly by the
/// first offer write, destroyed by explicit teardown or the idle sweeper.
#[derive(Debug)]
pub struct Room {
    pub offer: Option<SessionDescription>,
    pub answer: Option<SessionDescription>,
    pub candidates: Vec<IceCandidate>,
    created_at: Instant,
    last_activity: Instant,
}

impl Room {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            offer: None,
            answer: None,
            candidates: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Refresh the activity clock. Called on every successful mutation so
    /// the sweeper only reclaims rooms nobody is still signaling through.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}
