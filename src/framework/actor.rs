//! # Generic Actor Server
//!
//! [`ResourceActor`] owns a collection of entities and processes requests for
//! them one at a time inside a single Tokio task.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "server" half of the actor: it owns the `store` and the
/// receiving end of the channel. Requests are handled sequentially, so two
/// concurrent updates to the same entity can never interleave and no lock is
/// needed around the store.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Implementation Details
///
/// The store is a `BTreeMap` keyed by id. Ids come from a `u32` counter
/// starting at 1, so iterating the map backwards yields newest-first order,
/// which is what `List` returns.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "tableside::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            // Only consume the id once the entity is accepted.
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .rev()
                        .filter(|item| query.matches(item))
                        .take(query.max_len())
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, returned = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Apply to a scratch copy so a failed hook leaves the stored entity untouched.
                        let mut next = item.clone();
                        if let Err(e) = next.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = next;
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let mut next = item.clone();
                        let result = next
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                *item = next;
                                info!(entity_type, %id, "Action ok");
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Query;
    use async_trait::async_trait;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        label: String,
        punched: u32,
    }

    #[derive(Debug)]
    struct TicketCreate {
        label: String,
    }

    #[derive(Debug)]
    struct TicketUpdate {
        label: String,
    }

    #[derive(Debug)]
    enum TicketAction {
        Punch,
    }

    #[derive(Debug, thiserror::Error)]
    enum TicketError {
        #[error("label must not be empty")]
        EmptyLabel,
        #[error("ticket already punched")]
        AlreadyPunched,
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u32;
        type Create = TicketCreate;
        type Update = TicketUpdate;
        type Action = TicketAction;
        type ActionResult = u32;
        type Context = ();
        type Error = TicketError;

        fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
            if params.label.is_empty() {
                return Err(TicketError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                punched: 0,
            })
        }

        async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), TicketError> {
            if update.label.is_empty() {
                return Err(TicketError::EmptyLabel);
            }
            self.label = update.label;
            Ok(())
        }

        async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<u32, TicketError> {
            match action {
                TicketAction::Punch => {
                    if self.punched > 0 {
                        return Err(TicketError::AlreadyPunched);
                    }
                    self.punched += 1;
                    Ok(self.punched)
                }
            }
        }
    }

    fn spawn_tickets() -> ResourceClient<Ticket> {
        let (actor, client) = ResourceActor::<Ticket>::new(10);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_resource_actor_crud_and_actions() {
        let client = spawn_tickets();

        let id = client
            .create(TicketCreate { label: "soup".into() })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let punched = client.perform_action(id, TicketAction::Punch).await.unwrap();
        assert_eq!(punched, 1);

        let again = client.perform_action(id, TicketAction::Punch).await;
        let err = again.unwrap_err();
        assert!(matches!(
            err.entity_error::<TicketError>(),
            Some(TicketError::AlreadyPunched)
        ));

        let updated = client
            .update(id, TicketUpdate { label: "stew".into() })
            .await
            .unwrap();
        assert_eq!(updated.label, "stew");
        assert_eq!(updated.punched, 1);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_entity_untouched() {
        let client = spawn_tickets();
        let id = client
            .create(TicketCreate { label: "soup".into() })
            .await
            .unwrap();

        let result = client.update(id, TicketUpdate { label: String::new() }).await;
        assert!(result.is_err());

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.label, "soup");
    }

    #[tokio::test]
    async fn test_rejected_create_does_not_consume_an_id() {
        let client = spawn_tickets();

        assert!(client
            .create(TicketCreate { label: String::new() })
            .await
            .is_err());
        let id = client
            .create(TicketCreate { label: "bread".into() })
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_filtered_and_capped() {
        let client = spawn_tickets();
        for label in ["a", "b", "c", "d"] {
            client
                .create(TicketCreate { label: label.into() })
                .await
                .unwrap();
        }

        let all = client.list(Query::all()).await.unwrap();
        let labels: Vec<_> = all.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["d", "c", "b", "a"]);

        let capped = client.list(Query::all().limit(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].label, "d");

        let odd = client
            .list(Query::all().filter(|t: &Ticket| t.id % 2 == 1))
            .await
            .unwrap();
        let ids: Vec<_> = odd.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let client = spawn_tickets();
        assert!(client.get(42).await.unwrap().is_none());
        let err = client.perform_action(42, TicketAction::Punch).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "42"));
    }
}
