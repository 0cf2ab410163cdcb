//! The narrow repository boundary between the coordinator and order persistence.
//!
//! The coordinator only ever talks to an [`OrderStore`]. The crate's own
//! implementation is [`OrderClient`](crate::clients::OrderClient), backed by the
//! in-process order actor; a database-backed store can be swapped in by
//! implementing this trait.
//!
//! Implementations must apply `update_status` and `update_confirmation` as a
//! single atomic read-modify-write per order.

use crate::model::{ConfirmRole, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns its id.
    async fn create(&self, params: OrderCreate) -> Result<OrderId, OrderError>;

    async fn get(&self, id: OrderId) -> Result<Order, OrderError>;

    /// Most recent first, at most `limit` orders.
    async fn list(&self, limit: usize) -> Result<Vec<Order>, OrderError>;

    /// Every order placed on `date` (UTC), most recent first.
    async fn list_on_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError>;

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError>;

    async fn update_confirmation(&self, id: OrderId, role: ConfirmRole) -> Result<Order, OrderError>;
}
