pub mod actor_client;
pub mod jukebox_client;
pub mod order_client;

pub use actor_client::*;
pub use jukebox_client::*;
pub use order_client::*;
