//! Pure data structures shared by the actors, the coordinator and the wire.

pub mod music;
pub mod order;

pub use music::*;
pub use order::*;
