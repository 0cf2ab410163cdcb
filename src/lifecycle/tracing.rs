//! # Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by
//! `RUST_LOG`. Call it once, at the top of `main`.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=tableside::broadcast=debug cargo run
//! ```
//!
//! Log lines carry structured fields instead of module paths: `entity_type`
//! and `id` from the order actor, `channel` and `subscriber` from the
//! broadcaster. At `debug`, create payloads are logged once on entry:
//!
//! ```text
//! DEBUG create:create called params=OrderCreate { customer_name: "Ali", table_number: "5", .. }
//! INFO Created entity_type="Order" id=order_1 size=1
//! DEBUG Broadcast channel=orders delivered=2 total=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
