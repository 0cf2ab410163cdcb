//! Songs, the now-playing slot and the read model of a voting round.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a song in the fixed library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub u32);

impl From<u32> for SongId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "song_{}", self.0)
    }
}

/// A library entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn new(id: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: SongId(id),
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// What the room is hearing right now. Only title and artist are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
}

impl From<&Song> for NowPlaying {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
        }
    }
}

/// One candidate as shown to patrons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStanding {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    /// `floor(votes * 100 / total)`, 0 while nobody has voted.
    pub percent: u32,
}

/// Snapshot returned by the music status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicStatus {
    pub now_playing: NowPlaying,
    /// Highest share first; equal shares keep round order.
    pub candidates: Vec<CandidateStanding>,
    pub total_votes: u32,
}

/// Result of a successful vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Counted; the round is still open.
    Voted { total: u32 },
    /// Counted and it closed the round.
    Rotated { now_playing: NowPlaying },
}

impl VoteOutcome {
    pub fn rotated(&self) -> bool {
        matches!(self, VoteOutcome::Rotated { .. })
    }
}
