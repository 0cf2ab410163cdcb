//! # Generic Messages
//!
//! The request envelope exchanged between [`ResourceClient`](super::ResourceClient)
//! and [`ResourceActor`](super::ResourceActor), plus the [`Query`] used by list
//! requests.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Selection for a `List` request.
///
/// Results always come back newest first (descending id). An optional
/// predicate narrows the set and an optional limit caps it after filtering.
pub struct Query<T> {
    limit: Option<usize>,
    predicate: Option<Predicate<T>>,
}

impl<T> Query<T> {
    /// Every stored entity.
    pub fn all() -> Self {
        Self {
            limit: None,
            predicate: None,
        }
    }

    /// Keep at most `limit` entities.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Keep only entities for which `predicate` returns true.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(item))
    }

    pub fn max_len(&self) -> usize {
        self.limit.unwrap_or(usize::MAX)
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("limit", &self.limit)
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each variant is one lifecycle operation on the actor's resource type:
///
/// - **Create**: allocate an id and build the entity from [`ActorEntity::Create`].
/// - **Get**: fetch the current state by id.
/// - **List**: newest-first scan narrowed by a [`Query`].
/// - **Update**: mutate via [`ActorEntity::Update`], answering with the new state.
/// - **Action**: run a custom [`ActorEntity::Action`].
///
/// Records are never removed by this framework; retention is an external concern.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Variant name, for logs and test diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "Create",
            ResourceRequest::Get { .. } => "Get",
            ResourceRequest::List { .. } => "List",
            ResourceRequest::Update { .. } => "Update",
            ResourceRequest::Action { .. } => "Action",
        }
    }
}
