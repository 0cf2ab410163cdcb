//! [`ActorEntity`] implementation for [`Order`].
//!
//! Status updates arrive as [`OrderUpdate`] and confirmations as
//! [`OrderAction::Confirm`]. Both are applied by the state machine on
//! [`Order`] inside the actor task.

use crate::framework::ActorEntity;
use crate::model::{ConfirmRole, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;

/// New kitchen status for an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}

/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy)]
pub enum OrderAction {
    /// Delivery acknowledged by one side.
    Confirm(ConfirmRole),
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    /// The order as it stands after the action.
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Order::new(id, params, Utc::now())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), OrderError> {
        self.set_status(update.status);
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::Confirm(role) => {
                self.confirm(role);
                Ok(self.clone())
            }
        }
    }
}
