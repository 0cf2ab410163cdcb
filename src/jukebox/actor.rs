//! # Jukebox Actor
//!
//! A single task that owns the [`Jukebox`]. Status reads and votes are queued
//! on one channel and handled in arrival order, so a vote and any rotation it
//! triggers can never interleave with another vote.

use super::round::Jukebox;
use super::VoteError;
use crate::clients::JukeboxClient;
use crate::model::{MusicStatus, SongId, VoteOutcome};
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Messages understood by the jukebox actor.
pub enum JukeboxRequest {
    Status {
        respond_to: oneshot::Sender<MusicStatus>,
    },
    Vote {
        id: SongId,
        respond_to: oneshot::Sender<Result<VoteOutcome, VoteError>>,
    },
}

pub struct JukeboxActor<R> {
    receiver: mpsc::Receiver<JukeboxRequest>,
    jukebox: Jukebox<R>,
}

impl<R: Rng + Send + 'static> JukeboxActor<R> {
    /// Wraps `jukebox` in an actor and returns it with its client.
    pub fn new(jukebox: Jukebox<R>, buffer_size: usize) -> (Self, JukeboxClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, jukebox };
        (actor, JukeboxClient::new(sender))
    }

    /// Runs until every client is dropped.
    pub async fn run(mut self) {
        info!(candidates = ?self.jukebox.candidate_ids(), "Jukebox started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                JukeboxRequest::Status { respond_to } => {
                    debug!(total = self.jukebox.total_votes(), "Status");
                    let _ = respond_to.send(self.jukebox.status());
                }
                JukeboxRequest::Vote { id, respond_to } => {
                    let result = self.jukebox.vote(id);
                    if let Err(e) = &result {
                        warn!(%id, error = %e, "Vote rejected");
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!("Jukebox stopped");
    }
}
