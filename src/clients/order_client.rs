//! # Order Client
//!
//! Wraps a `ResourceClient<Order>` and exposes it as an [`OrderStore`].
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, Query, ResourceClient};
use crate::model::{ConfirmRole, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError, OrderUpdate};
use crate::store::OrderStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<OrderError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Persistence(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, params))]
    async fn create(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: usize) -> Result<Vec<Order>, OrderError> {
        self.query(Query::all().limit(limit)).await
    }

    #[instrument(skip(self))]
    async fn list_on_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError> {
        self.query(Query::all().filter(move |order: &Order| order.placed_on() == date))
            .await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update_confirmation(&self, id: OrderId, role: ConfirmRole) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Confirm(role))
            .await
            .map_err(Self::map_error)
    }
}
