//! A customer order and the rules for moving it through the kitchen.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](crate::framework::ActorEntity) (see
//! [`order_actor::entity`](crate::order_actor::entity)), so it is owned by a
//! [`ResourceActor`](crate::framework::ResourceActor) and every transition below
//! runs as one atomic step inside that actor.
//!
//! # Dual confirmation
//! An order is finished when both the waiter and the customer have confirmed
//! delivery. Kitchen staff may also set `completed` directly through
//! [`Order::set_status`]; that is the only way to be `completed` without both flags.
use crate::order_actor::OrderError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Kitchen-side preparation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

/// Who is acknowledging delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmRole {
    Waiter,
    Customer,
}

impl ConfirmRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmRole::Waiter => "waiter",
            ConfirmRole::Customer => "customer",
        }
    }
}

impl Display for ConfirmRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfirmRole {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiter" => Ok(ConfirmRole::Waiter),
            "customer" => Ok(ConfirmRole::Customer),
            other => Err(OrderError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub table_number: String,
    /// Free text, never interpreted here.
    pub items: String,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub waiter_confirmed: bool,
    pub customer_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub table_number: String,
    pub items: String,
    pub total_price: Decimal,
}

impl OrderCreate {
    /// Rejects payloads that could never become a valid order.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.customer_name.trim().is_empty() {
            return Err(OrderError::Validation("customer name is empty".into()));
        }
        if self.table_number.trim().is_empty() {
            return Err(OrderError::Validation("table number is empty".into()));
        }
        if self.total_price < Decimal::ZERO {
            return Err(OrderError::Validation(format!(
                "total price {} is negative",
                self.total_price
            )));
        }
        Ok(())
    }
}

impl Order {
    /// Builds a freshly submitted order: `preparing`, nobody has confirmed yet.
    pub fn new(id: OrderId, params: OrderCreate, created_at: DateTime<Utc>) -> Result<Self, OrderError> {
        params.validate()?;
        Ok(Self {
            id,
            customer_name: params.customer_name,
            table_number: params.table_number,
            items: params.items,
            total_price: params.total_price,
            status: OrderStatus::Preparing,
            waiter_confirmed: false,
            customer_confirmed: false,
            created_at,
        })
    }

    /// Overwrites the status.
    ///
    /// Any status may follow any other so that staff can undo a mis-click.
    /// Setting `completed` here bypasses dual confirmation.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Records a delivery confirmation.
    ///
    /// Flags only ever go from false to true. Once both are set the order is
    /// `completed`, whatever its previous status.
    pub fn confirm(&mut self, role: ConfirmRole) {
        match role {
            ConfirmRole::Waiter => self.waiter_confirmed = true,
            ConfirmRole::Customer => self.customer_confirmed = true,
        }
        if self.is_fully_confirmed() {
            self.status = OrderStatus::Completed;
        }
    }

    pub fn is_fully_confirmed(&self) -> bool {
        self.waiter_confirmed && self.customer_confirmed
    }

    /// Calendar day (UTC) the order was placed on.
    pub fn placed_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}
