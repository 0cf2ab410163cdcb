//! # Tableside
//!
//! Real-time order and jukebox engine for a table-service restaurant.
//!
//! Customers place orders from their table, the kitchen moves them through
//! `preparing`/`ready`/`completed`, and an order is finished once both the
//! waiter and the customer confirm delivery. Meanwhile patrons vote on the
//! next song. Every change is pushed to subscribed screens over named
//! broadcast channels.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` that owns a collection of entities and
//! applies requests to them one at a time.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor), [`MockClient`](framework::mock::MockClient).
//!
//! ### 2. The State ([`model`], [`order_actor`], [`jukebox`])
//! The order state machine with dual confirmation, hosted by the order actor,
//! and the voting round, hosted by the jukebox actor.
//!
//! ### 3. The Interface ([`clients`], [`store`])
//! Typed clients over the actors. [`OrderClient`](clients::OrderClient) is the
//! in-process [`OrderStore`](store::OrderStore).
//!
//! ### 4. The Edge ([`coordinator`], [`broadcast`])
//! [`Coordinator`](coordinator::Coordinator) validates input, applies writes,
//! then announces them through the [`Broadcaster`](broadcast::Broadcaster).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`RestaurantSystem`](lifecycle::RestaurantSystem) builds everything from a
//! [`Config`](config::Config) and shuts it down again.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! TABLESIDE_CONFIG=tableside.toml RUST_LOG=debug cargo run
//! ```

pub mod broadcast;
pub mod clients;
pub mod config;
pub mod coordinator;
pub mod framework;
pub mod jukebox;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod store;
