use rust_decimal::Decimal;
use std::sync::Arc;
use tableside::broadcast::{Channel, ConnectionHandle};
use tableside::config::Config;
use tableside::lifecycle::{setup_tracing, RestaurantSystem};
use tableside::model::OrderCreate;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    let system = RestaurantSystem::new(&config);
    let coordinator = system.coordinator.clone();

    // A kitchen screen listening on both channels.
    let (screen, mut feed) = ConnectionHandle::new(config.broadcast.queue_capacity);
    let screen = Arc::new(screen);
    coordinator.subscribe(Channel::Orders, screen.clone());
    coordinator.subscribe(Channel::Music, screen);
    let printer = tokio::spawn(async move {
        while let Some(message) = feed.recv().await {
            info!(%message, "Screen received");
        }
    });

    let order = async {
        let id = coordinator
            .create_order(OrderCreate {
                customer_name: "Ali".to_string(),
                table_number: "5".to_string(),
                items: "Mercimek çorbası".to_string(),
                total_price: Decimal::new(400, 1),
            })
            .await?;
        coordinator.set_status(id, "ready").await?;
        coordinator.confirm(id, "waiter").await?;
        let order = coordinator.confirm(id, "customer").await?;
        info!(%id, status = %order.status, "Order finished");
        Ok::<_, Box<dyn std::error::Error>>(())
    };
    order.instrument(tracing::info_span!("order_flow")).await?;

    let music = async {
        let status = coordinator.music_status().await?;
        info!(now_playing = %status.now_playing.title, "Jukebox open");
        let favourite = status.candidates.first().ok_or("no candidates")?.id;
        for _ in 0..config.jukebox.vote_threshold {
            let outcome = coordinator.vote(favourite).await?;
            info!(?outcome, "Voted");
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    };
    music.instrument(tracing::info_span!("music_flow")).await?;

    // The screen's queue closes once the last broadcaster handle is gone.
    drop(coordinator);
    system.shutdown().await?;
    printer.await?;
    Ok(())
}
