//! # Coordinator
//!
//! The single entry point a transport layer talks to. Each write goes to the
//! order store or the jukebox first, and only a successful write is announced
//! on the matching broadcast channel. Broadcast failures never reach the
//! caller.

use crate::broadcast::{
    Broadcaster, Channel, ConnectionHandle, MusicChange, MusicDelta, OrderDelta, Subscriber,
    SubscriberId,
};
use crate::clients::JukeboxClient;
use crate::config::Config;
use crate::jukebox::VoteError;
use crate::model::{ConfirmRole, MusicStatus, Order, OrderCreate, OrderId, OrderStatus, SongId, VoteOutcome};
use crate::order_actor::OrderError;
use crate::store::OrderStore;
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct Coordinator {
    orders: Arc<dyn OrderStore>,
    jukebox: JukeboxClient,
    broadcaster: Arc<Broadcaster>,
    list_limit: usize,
    queue_capacity: usize,
}

impl Coordinator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        jukebox: JukeboxClient,
        broadcaster: Arc<Broadcaster>,
        config: &Config,
    ) -> Self {
        Self {
            orders,
            jukebox,
            broadcaster,
            list_limit: config.orders.list_limit,
            queue_capacity: config.broadcast.queue_capacity,
        }
    }

    // ---- orders ----

    #[instrument(skip(self, params), fields(table = %params.table_number))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        params.validate()?;
        let id = self.orders.create(params).await?;
        info!(%id, "Order placed");
        self.broadcaster
            .broadcast(&Channel::Orders, &OrderDelta::NewOrder { id })
            .await;
        Ok(id)
    }

    /// Most recent first, capped by `orders.list_limit`.
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.list(self.list_limit).await
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.get(id).await
    }

    /// Orders placed on `date`, most recent first.
    pub async fn order_history(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError> {
        self.orders.list_on_date(date).await
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: &str) -> Result<Order, OrderError> {
        let status: OrderStatus = status.parse()?;
        let order = self.orders.update_status(id, status).await?;
        info!(%id, %status, "Status set");
        self.broadcaster
            .broadcast(
                &Channel::Orders,
                &OrderDelta::Update {
                    id,
                    status: order.status,
                    waiter: None,
                    customer: None,
                },
            )
            .await;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn confirm(&self, id: OrderId, role: &str) -> Result<Order, OrderError> {
        let role: ConfirmRole = role.parse()?;
        let order = self.orders.update_confirmation(id, role).await?;
        info!(
            %id,
            %role,
            waiter = order.waiter_confirmed,
            customer = order.customer_confirmed,
            status = %order.status,
            "Confirmed"
        );
        self.broadcaster
            .broadcast(
                &Channel::Orders,
                &OrderDelta::Update {
                    id,
                    status: order.status,
                    waiter: Some(order.waiter_confirmed),
                    customer: Some(order.customer_confirmed),
                },
            )
            .await;
        Ok(order)
    }

    // ---- music ----

    pub async fn music_status(&self) -> Result<MusicStatus, VoteError> {
        self.jukebox.status().await
    }

    #[instrument(skip(self))]
    pub async fn vote(&self, id: SongId) -> Result<VoteOutcome, VoteError> {
        let outcome = self.jukebox.vote(id).await?;
        let status = if outcome.rotated() {
            MusicChange::Rotated
        } else {
            MusicChange::Voted
        };
        self.broadcaster
            .broadcast(&Channel::Music, &MusicDelta::Update { status })
            .await;
        Ok(outcome)
    }

    // ---- subscriptions ----

    pub fn subscribe(&self, channel: Channel, subscriber: Arc<dyn Subscriber>) {
        self.broadcaster.subscribe(channel, subscriber);
    }

    pub fn unsubscribe(&self, channel: &Channel, id: SubscriberId) -> bool {
        self.broadcaster.unsubscribe(channel, id)
    }

    /// Subscribes `subscriber` until `closed` resolves.
    pub fn attach<F>(&self, channel: Channel, subscriber: Arc<dyn Subscriber>, closed: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.broadcaster.attach(channel, subscriber, closed)
    }

    /// Opens a queue-backed connection on `channel`. The caller forwards what
    /// arrives on the receiver to its socket, and resolves `closed` when the
    /// socket's read side ends.
    pub fn connect<F>(&self, channel: Channel, closed: F) -> (SubscriberId, mpsc::Receiver<Arc<str>>)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (handle, rx) = ConnectionHandle::new(self.queue_capacity);
        let id = handle.id();
        self.attach(channel, Arc::new(handle), closed);
        (id, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OrderClient;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::jukebox;
    use crate::order_actor;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn soup() -> OrderCreate {
        OrderCreate {
            customer_name: "Ali".into(),
            table_number: "5".into(),
            items: "soup".into(),
            total_price: dec!(40.0),
        }
    }

    fn coordinator_over(orders: Arc<dyn OrderStore>) -> Coordinator {
        coordinator_with(orders, &Config::default())
    }

    fn coordinator_with(orders: Arc<dyn OrderStore>, config: &Config) -> Coordinator {
        let (actor, music) = jukebox::new(&config.jukebox, 8);
        tokio::spawn(actor.run());
        let broadcaster = Arc::new(Broadcaster::new(Duration::from_millis(100)));
        Coordinator::new(orders, music, broadcaster, config)
    }

    fn spawn_orders() -> Arc<dyn OrderStore> {
        let (actor, orders) = order_actor::new(8);
        tokio::spawn(actor.run(()));
        Arc::new(orders)
    }

    fn listen(coordinator: &Coordinator, channel: Channel) -> mpsc::Receiver<Arc<str>> {
        let (handle, rx) = ConnectionHandle::new(16);
        coordinator.subscribe(channel, Arc::new(handle));
        rx
    }

    #[tokio::test]
    async fn test_failed_write_is_not_broadcast() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_update(Err(FrameworkError::ActorDropped));
        mock.expect_action(Err(FrameworkError::NotFound("order_3".into())));
        let coordinator = coordinator_over(Arc::new(OrderClient::new(mock.client())));
        let mut rx = listen(&coordinator, Channel::Orders);

        let result = coordinator.set_status(OrderId(3), "ready").await;
        assert!(matches!(result, Err(OrderError::Persistence(_))));
        let result = coordinator.confirm(OrderId(3), "waiter").await;
        assert_eq!(result, Err(OrderError::NotFound("order_3".into())));

        assert!(rx.try_recv().is_err());
        mock.verify();
    }

    #[tokio::test]
    async fn test_bad_input_never_reaches_the_store() {
        let mock = MockClient::<Order>::new();
        let coordinator = coordinator_over(Arc::new(OrderClient::new(mock.client())));
        let mut rx = listen(&coordinator, Channel::Orders);

        assert_eq!(
            coordinator.set_status(OrderId(1), "cancelled").await,
            Err(OrderError::InvalidStatus("cancelled".into()))
        );
        assert_eq!(
            coordinator.confirm(OrderId(1), "chef").await,
            Err(OrderError::InvalidRole("chef".into()))
        );
        let mut nameless = soup();
        nameless.customer_name = "  ".into();
        assert!(matches!(
            coordinator.create_order(nameless).await,
            Err(OrderError::Validation(_))
        ));

        assert!(rx.try_recv().is_err());
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_announces_new_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create(Ok(OrderId(7)));
        let coordinator = coordinator_over(Arc::new(OrderClient::new(mock.client())));
        let mut rx = listen(&coordinator, Channel::Orders);

        assert_eq!(coordinator.create_order(soup()).await, Ok(OrderId(7)));
        assert_eq!(rx.recv().await.as_deref(), Some(r#"{"type":"new_order","id":7}"#));
        mock.verify();
    }

    #[tokio::test]
    async fn test_vote_announces_music_update() {
        let mock = MockClient::<Order>::new();
        let coordinator = coordinator_over(Arc::new(OrderClient::new(mock.client())));
        let mut rx = listen(&coordinator, Channel::Music);

        let id = coordinator.music_status().await.unwrap().candidates[0].id;
        coordinator.vote(id).await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some(r#"{"type":"update","status":"voted"}"#));

        assert!(coordinator.vote(SongId(999)).await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_list_orders_applies_configured_cap() {
        let mut config = Config::default();
        config.orders.list_limit = 2;
        let coordinator = coordinator_with(spawn_orders(), &config);

        for table in ["1", "2", "3"] {
            let mut params = soup();
            params.table_number = table.into();
            coordinator.create_order(params).await.unwrap();
        }

        let listed: Vec<_> = coordinator
            .list_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(listed, vec![OrderId(3), OrderId(2)]);
    }

    #[tokio::test]
    async fn test_order_history_is_scoped_to_one_day() {
        let coordinator = coordinator_over(spawn_orders());
        coordinator.create_order(soup()).await.unwrap();
        coordinator.create_order(soup()).await.unwrap();

        let day = coordinator.get_order(OrderId(1)).await.unwrap().placed_on();
        let history: Vec<_> = coordinator
            .order_history(day)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(history, vec![OrderId(2), OrderId(1)]);

        let next_day = day.succ_opt().unwrap();
        assert!(coordinator.order_history(next_day).await.unwrap().is_empty());
    }
}
