//! JSON deltas pushed to subscribers.

use crate::model::{OrderId, OrderStatus};
use serde::Serialize;

/// Pushed on [`Channel::Orders`](super::Channel::Orders).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderDelta {
    NewOrder {
        id: OrderId,
    },
    Update {
        id: OrderId,
        status: OrderStatus,
        /// Only present on confirmation updates.
        #[serde(skip_serializing_if = "Option::is_none")]
        waiter: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        customer: Option<bool>,
    },
}

/// What happened to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicChange {
    Voted,
    Rotated,
}

/// Pushed on [`Channel::Music`](super::Channel::Music). Clients re-query the
/// status on receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MusicDelta {
    Update { status: MusicChange },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_update_omits_confirmation_flags() {
        let delta = OrderDelta::Update {
            id: OrderId(3),
            status: OrderStatus::Ready,
            waiter: None,
            customer: None,
        };
        assert_eq!(
            serde_json::to_value(&delta).unwrap(),
            json!({"type": "update", "id": 3, "status": "ready"})
        );
    }

    #[test]
    fn test_wire_shapes() {
        assert_eq!(
            serde_json::to_value(OrderDelta::NewOrder { id: OrderId(1) }).unwrap(),
            json!({"type": "new_order", "id": 1})
        );
        let confirmed = OrderDelta::Update {
            id: OrderId(1),
            status: OrderStatus::Completed,
            waiter: Some(true),
            customer: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&confirmed).unwrap(),
            json!({"type": "update", "id": 1, "status": "completed", "waiter": true, "customer": true})
        );
        assert_eq!(
            serde_json::to_value(MusicDelta::Update { status: MusicChange::Rotated }).unwrap(),
            json!({"type": "update", "status": "rotated"})
        );
    }
}
