//! Real-time fan-out of order and music changes to connected clients.

pub mod channel;
pub mod hub;
pub mod message;
pub mod subscriber;

pub use channel::*;
pub use hub::*;
pub use message::*;
pub use subscriber::*;
