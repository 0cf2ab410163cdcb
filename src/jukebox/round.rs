//! Voting round state and the rotation rule.
//!
//! [`Jukebox`] is plain synchronous state. It is only ever driven from the
//! jukebox actor, which is what makes a vote and the rotation it may trigger a
//! single atomic step.

use super::VoteError;
use crate::config::JukeboxConfig;
use crate::model::{CandidateStanding, MusicStatus, NowPlaying, Song, SongId, VoteOutcome};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Candidate {
    song: Song,
    votes: u32,
}

/// Now playing, the open round and the library future rounds are drawn from.
#[derive(Debug)]
pub struct Jukebox<R> {
    library: Vec<Song>,
    round_size: usize,
    threshold: u32,
    now_playing: NowPlaying,
    candidates: Vec<Candidate>,
    total_votes: u32,
    rng: R,
}

impl<R: Rng> Jukebox<R> {
    /// Opens the first round. Nothing has been voted in yet, so the idle
    /// track from `config` is what is playing.
    pub fn new(config: &JukeboxConfig, rng: R) -> Self {
        let mut jukebox = Self {
            library: config.library.clone(),
            round_size: config.round_size.min(config.library.len()),
            threshold: config.vote_threshold,
            now_playing: config.idle_track.clone(),
            candidates: Vec::new(),
            total_votes: 0,
            rng,
        };
        jukebox.candidates = jukebox.draw();
        jukebox
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn total_votes(&self) -> u32 {
        self.total_votes
    }

    /// Candidate ids in round order.
    pub fn candidate_ids(&self) -> Vec<SongId> {
        self.candidates.iter().map(|c| c.song.id).collect()
    }

    pub fn status(&self) -> MusicStatus {
        let mut candidates: Vec<CandidateStanding> = self
            .candidates
            .iter()
            .map(|c| CandidateStanding {
                id: c.song.id,
                title: c.song.title.clone(),
                artist: c.song.artist.clone(),
                percent: share(c.votes, self.total_votes),
            })
            .collect();
        // Stable: equal shares keep round order.
        candidates.sort_by(|a, b| b.percent.cmp(&a.percent));

        MusicStatus {
            now_playing: self.now_playing.clone(),
            candidates,
            total_votes: self.total_votes,
        }
    }

    /// Counts one vote and closes the round once the threshold is reached.
    pub fn vote(&mut self, id: SongId) -> Result<VoteOutcome, VoteError> {
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| c.song.id == id)
            .ok_or_else(|| VoteError::UnknownCandidate(id.to_string()))?;
        candidate.votes += 1;
        self.total_votes += 1;
        debug!(%id, votes = candidate.votes, total = self.total_votes, "Vote counted");

        if self.total_votes >= self.threshold {
            let now_playing = self.rotate();
            return Ok(VoteOutcome::Rotated { now_playing });
        }
        Ok(VoteOutcome::Voted {
            total: self.total_votes,
        })
    }

    /// Promotes the leader to now playing and opens a fresh round.
    ///
    /// The leader is the first candidate in round order holding the highest count.
    fn rotate(&mut self) -> NowPlaying {
        let mut winner: Option<&Candidate> = None;
        for candidate in &self.candidates {
            if winner.map_or(true, |w| candidate.votes > w.votes) {
                winner = Some(candidate);
            }
        }
        if let Some(winner) = winner {
            self.now_playing = NowPlaying::from(&winner.song);
        }

        self.candidates = self.draw();
        self.total_votes = 0;
        info!(
            title = %self.now_playing.title,
            artist = %self.now_playing.artist,
            candidates = ?self.candidate_ids(),
            "Round rotated"
        );
        self.now_playing.clone()
    }

    /// Uniform sample without replacement; songs may repeat across rounds.
    fn draw(&mut self) -> Vec<Candidate> {
        self.library
            .choose_multiple(&mut self.rng, self.round_size)
            .map(|song| Candidate {
                song: song.clone(),
                votes: 0,
            })
            .collect()
    }
}

fn share(votes: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (u64::from(votes) * 100 / u64::from(total)) as u32
    }
}
