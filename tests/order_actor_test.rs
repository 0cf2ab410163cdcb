use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use tableside::clients::actor_client::ActorClient;
use tableside::model::{ConfirmRole, OrderCreate, OrderId, OrderStatus};
use tableside::order_actor::{self, OrderError};
use tableside::store::OrderStore;

fn order(name: &str, table: &str) -> OrderCreate {
    OrderCreate {
        customer_name: name.to_string(),
        table_number: table.to_string(),
        items: "çay".to_string(),
        total_price: dec!(12.50),
    }
}

/// Real order actor driven through the `OrderStore` boundary.
#[tokio::test]
async fn test_list_is_newest_first_and_capped() {
    let (actor, orders) = order_actor::new(16);
    let handle = tokio::spawn(actor.run(()));

    for (i, name) in ["Ayşe", "Burak", "Cem"].iter().enumerate() {
        let id = orders.create(order(name, &i.to_string())).await.unwrap();
        assert_eq!(id, OrderId(i as u32 + 1));
    }

    let listed: Vec<_> = orders.list(10).await.unwrap().into_iter().map(|o| o.id).collect();
    assert_eq!(listed, vec![OrderId(3), OrderId(2), OrderId(1)]);
    let capped: Vec<_> = orders.list(2).await.unwrap().into_iter().map(|o| o.id).collect();
    assert_eq!(capped, vec![OrderId(3), OrderId(2)]);

    assert_eq!(orders.fetch(OrderId(9)).await, Ok(None));

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_history_filters_by_day() {
    let (actor, orders) = order_actor::new(16);
    tokio::spawn(actor.run(()));

    orders.create(order("Deniz", "2")).await.unwrap();
    let today = Utc::now().date_naive();

    assert_eq!(orders.list_on_date(today).await.unwrap().len(), 1);
    let yesterday = today - Duration::days(1);
    assert!(orders.list_on_date(yesterday).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_create_is_rejected_without_consuming_an_id() {
    let (actor, orders) = order_actor::new(16);
    tokio::spawn(actor.run(()));

    let mut negative = order("Ege", "4");
    negative.total_price = dec!(-1);
    assert!(matches!(orders.create(negative).await, Err(OrderError::Validation(_))));

    assert_eq!(orders.create(order("Ege", "4")).await, Ok(OrderId(1)));
}

#[tokio::test]
async fn test_concurrent_confirmations_both_land() {
    let (actor, orders) = order_actor::new(16);
    tokio::spawn(actor.run(()));
    let id = orders.create(order("Fatma", "7")).await.unwrap();

    let waiter = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.update_confirmation(id, ConfirmRole::Waiter).await })
    };
    let customer = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.update_confirmation(id, ConfirmRole::Customer).await })
    };
    waiter.await.unwrap().unwrap();
    customer.await.unwrap().unwrap();

    let order = orders.get(id).await.unwrap();
    assert!(order.waiter_confirmed && order.customer_confirmed);
    assert_eq!(order.status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_status_override_and_late_confirmation() {
    let (actor, orders) = order_actor::new(16);
    tokio::spawn(actor.run(()));
    let id = orders.create(order("Gül", "1")).await.unwrap();

    // Completed by hand, then walked back. Flags are untouched throughout.
    let order = orders.update_status(id, OrderStatus::Completed).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(!order.waiter_confirmed);
    let order = orders.update_status(id, OrderStatus::Preparing).await.unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);

    orders.update_confirmation(id, ConfirmRole::Customer).await.unwrap();
    let again = orders.update_confirmation(id, ConfirmRole::Customer).await.unwrap();
    assert!(again.customer_confirmed);
    assert_eq!(again.status, OrderStatus::Preparing);
}
