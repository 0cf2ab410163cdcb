//! # Jukebox
//!
//! Patrons vote on a small set of candidate songs. Once enough votes are in,
//! the leading candidate becomes now playing and a new set is drawn.
//!
//! - [`round`] - the voting state and rotation rule
//! - [`actor`] - the task that serialises access to it
//! - [`error`] - [`VoteError`]

pub mod actor;
pub mod error;
pub mod round;

pub use actor::*;
pub use error::*;
pub use round::*;

use crate::clients::JukeboxClient;
use crate::config::JukeboxConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a jukebox actor seeded from the OS and its client.
pub fn new(config: &JukeboxConfig, buffer_size: usize) -> (JukeboxActor<StdRng>, JukeboxClient) {
    JukeboxActor::new(Jukebox::new(config, StdRng::from_entropy()), buffer_size)
}
