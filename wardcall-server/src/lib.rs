pub mod config;
pub mod http;
pub mod store;

pub use config::ServerConfig;
pub use http::{AppState, router};
pub use store::RoomStore;
