mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use wardcall_core::IceServerConfig;

use crate::store::RoomStore;

pub struct AppState {
    pub store: RoomStore,
    pub ice_servers: Vec<IceServerConfig>,
}

/// The per-room signaling surface. Browser dashboards poll these routes
/// cross-origin, hence the permissive CORS layer.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/rooms/{room_id}", get(get_room).delete(delete_room))
        .route("/rooms/{room_id}/offer", get(get_offer).post(post_offer))
        .route("/rooms/{room_id}/answer", get(get_answer).post(post_answer))
        .route(
            "/rooms/{room_id}/candidates",
            get(get_candidates).post(post_candidate),
        )
        .route("/ice-config", get(get_ice_config))
        .layer(cors)
        .with_state(state)
}
