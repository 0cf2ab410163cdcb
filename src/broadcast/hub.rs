//! # Channel Broadcaster
//!
//! Keeps, per channel, the list of subscribed connections in registration
//! order and fans messages out to them.
//!
//! Delivery is best effort. Every send runs under its own timeout, and a
//! failure is logged and forgotten. It neither blocks the other subscribers
//! nor removes the failing one. Connections leave a channel only through
//! [`Broadcaster::unsubscribe`], usually called by the watcher that
//! [`Broadcaster::attach`] spawns once the connection's read side closes.

use super::channel::Channel;
use super::subscriber::{DeliveryError, Subscriber, SubscriberId};
use dashmap::DashMap;
use futures::future::join_all;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct Broadcaster {
    channels: DashMap<Channel, Vec<Arc<dyn Subscriber>>>,
    send_timeout: Duration,
}

impl Broadcaster {
    pub fn new(send_timeout: Duration) -> Self {
        Self {
            channels: DashMap::new(),
            send_timeout,
        }
    }

    /// Adds `subscriber` to the end of `channel`'s list. Subscribing the same
    /// connection twice is a no-op.
    pub fn subscribe(&self, channel: Channel, subscriber: Arc<dyn Subscriber>) {
        let id = subscriber.id();
        let mut list = self.channels.entry(channel.clone()).or_default();
        if list.iter().any(|s| s.id() == id) {
            return;
        }
        list.push(subscriber);
        debug!(%channel, subscriber = %id, count = list.len(), "Subscribed");
    }

    /// Removes the connection from `channel`. Returns whether it was there.
    pub fn unsubscribe(&self, channel: &Channel, id: SubscriberId) -> bool {
        let removed = match self.channels.get_mut(channel) {
            Some(mut list) => {
                let before = list.len();
                list.retain(|s| s.id() != id);
                list.len() != before
            }
            None => false,
        };
        self.channels.remove_if(channel, |_, list| list.is_empty());
        if removed {
            debug!(%channel, subscriber = %id, "Unsubscribed");
        }
        removed
    }

    pub fn subscriber_count(&self, channel: &Channel) -> usize {
        self.channels.get(channel).map_or(0, |list| list.len())
    }

    /// Serializes `message` once and delivers it to every current subscriber
    /// of `channel`.
    pub async fn broadcast<M: Serialize>(&self, channel: &Channel, message: &M) {
        let targets: Vec<Arc<dyn Subscriber>> = self
            .channels
            .get(channel)
            .map(|list| list.clone())
            .unwrap_or_default();
        if targets.is_empty() {
            return;
        }

        let payload: Arc<str> = match serde_json::to_string(message) {
            Ok(json) => json.into(),
            Err(e) => {
                warn!(%channel, error = %e, "Dropping unserializable message");
                return;
            }
        };

        let sends = targets.iter().map(|subscriber| {
            let payload = Arc::clone(&payload);
            async move {
                let result = tokio::time::timeout(self.send_timeout, subscriber.deliver(payload))
                    .await
                    .unwrap_or(Err(DeliveryError::Timeout));
                (subscriber.id(), result)
            }
        });

        let mut delivered = 0;
        for (id, result) in join_all(sends).await {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => warn!(%channel, subscriber = %id, error = %e, "Delivery failed"),
            }
        }
        debug!(%channel, delivered, total = targets.len(), "Broadcast");
    }

    /// Subscribes `subscriber` and spawns a watcher that unsubscribes it once
    /// `closed` resolves. `closed` should complete when the connection's read
    /// loop ends.
    pub fn attach<F>(
        self: &Arc<Self>,
        channel: Channel,
        subscriber: Arc<dyn Subscriber>,
        closed: F,
    ) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = subscriber.id();
        self.subscribe(channel.clone(), subscriber);

        let hub = Arc::clone(self);
        tokio::spawn(async move {
            closed.await;
            hub.unsubscribe(&channel, id);
            debug!(%channel, subscriber = %id, "Connection closed");
        })
    }
}
