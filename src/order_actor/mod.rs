//! # Order Actor
//!
//! Hosts every [`Order`] in a single [`ResourceActor`]. This is the in-process
//! implementation of the [`OrderStore`](crate::store::OrderStore) boundary:
//! records live for the life of the process and each request is applied
//! atomically because the actor handles one request at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, orders) = order_actor::new(32);
//! tokio::spawn(actor.run(()));
//! let id = orders.create(params).await?;
//! ```

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
