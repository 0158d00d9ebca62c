mod room;
mod room_store;
mod sweeper;

pub use room::*;
pub use room_store::*;
pub use sweeper::*;
