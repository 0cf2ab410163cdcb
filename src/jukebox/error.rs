//! Error types for the jukebox.

use thiserror::Error;

/// Errors that can occur while reading or voting on the music round.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VoteError {
    /// The song is not one of the current round's candidates.
    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),

    /// The jukebox actor is gone.
    #[error("Jukebox unavailable: {0}")]
    Unavailable(String),
}
