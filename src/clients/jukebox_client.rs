use crate::jukebox::{JukeboxRequest, VoteError};
use crate::model::{MusicStatus, SongId, VoteOutcome};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// Cloneable handle to the jukebox actor.
#[derive(Clone)]
pub struct JukeboxClient {
    sender: mpsc::Sender<JukeboxRequest>,
}

impl JukeboxClient {
    pub fn new(sender: mpsc::Sender<JukeboxRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<MusicStatus, VoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(JukeboxRequest::Status { respond_to })
            .await
            .map_err(|_| VoteError::Unavailable("jukebox closed".into()))?;
        response
            .await
            .map_err(|_| VoteError::Unavailable("jukebox dropped the request".into()))
    }

    #[instrument(skip(self))]
    pub async fn vote(&self, id: SongId) -> Result<VoteOutcome, VoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(JukeboxRequest::Vote { id, respond_to })
            .await
            .map_err(|_| VoteError::Unavailable("jukebox closed".into()))?;
        response
            .await
            .map_err(|_| VoteError::Unavailable("jukebox dropped the request".into()))?
    }
}
