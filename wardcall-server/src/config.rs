use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use wardcall_core::IceServerConfig;

/// Runtime configuration for the signaling server, from flags or env vars.
#[derive(Debug, Clone, Parser)]
#[command(name = "wardcall-server")]
#[command(about = "REST signaling server for two-party video consultations")]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "WARDCALL_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// STUN server URLs handed to clients (repeatable).
    #[arg(long = "stun-url", env = "WARDCALL_STUN_URL")]
    pub stun_urls: Vec<String>,

    /// Optional TURN relay, with its credentials.
    #[arg(long, env = "WARDCALL_TURN_URL")]
    pub turn_url: Option<String>,

    #[arg(long, env = "WARDCALL_TURN_USERNAME")]
    pub turn_username: Option<String>,

    #[arg(long, env = "WARDCALL_TURN_CREDENTIAL")]
    pub turn_credential: Option<String>,

    /// Rooms idle longer than this are reclaimed. 0 disables sweeping.
    #[arg(long, env = "WARDCALL_ROOM_TTL_SECS", default_value_t = 900)]
    pub room_ttl_secs: u64,

    #[arg(long, env = "WARDCALL_SWEEP_INTERVAL_SECS", default_value_t = 60)]
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    /// The ICE server list served on `/ice-config`.
    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        let mut servers: Vec<IceServerConfig> = self
            .stun_urls
            .iter()
            .map(|url| IceServerConfig::stun(url.as_str()))
            .collect();

        if let Some(turn_url) = &self.turn_url {
            servers.push(IceServerConfig {
                urls: vec![turn_url.clone()],
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }

        servers
    }

    pub fn room_ttl(&self) -> Option<Duration> {
        (self.room_ttl_secs > 0).then(|| Duration::from_secs(self.room_ttl_secs))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
