use async_trait::async_trait;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Why a single delivery did not go through. Never surfaced to the caller of
/// a broadcast.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,
    #[error("outbound queue full")]
    Full,
    #[error("send timed out")]
    Timeout,
}

/// Process-unique identity of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Anything that can receive a serialized message.
#[async_trait]
pub trait Subscriber: Send + Sync {
    fn id(&self) -> SubscriberId;

    async fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError>;
}

/// Queue-backed subscriber. The transport's writer task owns the receiving
/// half and forwards each payload to the socket.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: SubscriberId,
    tx: mpsc::Sender<Arc<str>>,
}

impl ConnectionHandle {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Arc<str>>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = Self {
            id: SubscriberId::next(),
            tx,
        };
        (handle, rx)
    }
}

#[async_trait]
impl Subscriber for ConnectionHandle {
    fn id(&self) -> SubscriberId {
        self.id
    }

    async fn deliver(&self, payload: Arc<str>) -> Result<(), DeliveryError> {
        self.tx.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
