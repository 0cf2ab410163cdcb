use crate::broadcast::Broadcaster;
use crate::clients::{JukeboxClient, OrderClient};
use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::{jukebox, order_actor};
use std::sync::Arc;
use tracing::{error, info};

/// Starts and stops every long-running part of the engine.
///
/// `RestaurantSystem::new` spawns the order actor and the jukebox actor, then
/// wires their clients and a fresh [`Broadcaster`] into a [`Coordinator`].
/// Hand clones of the coordinator to whatever serves requests.
///
/// # Example
///
/// ```ignore
/// let system = RestaurantSystem::new(&Config::default());
/// let id = system.coordinator.create_order(params).await?;
/// system.shutdown().await?;
/// ```
pub struct RestaurantSystem {
    pub coordinator: Coordinator,
    pub orders: OrderClient,
    pub jukebox: JukeboxClient,
    pub broadcaster: Arc<Broadcaster>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        let (order_actor, orders) = order_actor::new(config.actors.buffer_size);
        let (jukebox_actor, jukebox) = jukebox::new(&config.jukebox, config.actors.buffer_size);

        let order_handle = tokio::spawn(order_actor.run(()));
        let jukebox_handle = tokio::spawn(jukebox_actor.run());

        let broadcaster = Arc::new(Broadcaster::new(config.broadcast.send_timeout()));
        let coordinator = Coordinator::new(
            Arc::new(orders.clone()),
            jukebox.clone(),
            Arc::clone(&broadcaster),
            config,
        );

        info!(
            list_limit = config.orders.list_limit,
            vote_threshold = config.jukebox.vote_threshold,
            library = config.jukebox.library.len(),
            "System started"
        );

        Self {
            coordinator,
            orders,
            jukebox,
            broadcaster,
            handles: vec![order_handle, jukebox_handle],
        }
    }

    /// Drops every client so the actors drain their queues and exit, then
    /// waits for them.
    ///
    /// Clones of the coordinator held elsewhere keep the actors alive, so drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.coordinator);
        drop(self.orders);
        drop(self.jukebox);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
