//! Canteen Order Server
//!
//! # Architecture overview
//!
//! Manages food-order fulfillment for a canteen: customers place
//! multi-item orders, kitchen staff advance or reject individual items,
//! admins override whole-order status and issue refunds, and every
//! committed state change is broadcast to all connected observers.
//!
//! - **Order lifecycle** (`orders`): the state machine, status derivation,
//!   concurrency guard and redb-backed store
//! - **Broadcast** (`broadcast`): process-wide event fan-out
//! - **HTTP API** (`api`): customer, kitchen, admin and observer routes
//! - **Identity boundary** (`auth`): actor headers → `CurrentActor`
//!
//! # Module structure
//!
//! ```text
//! canteen-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # actor identity middleware
//! ├── api/           # HTTP routes and handlers
//! ├── broadcast/     # event fan-out
//! ├── orders/        # order lifecycle engine
//! └── utils/         # error envelope, logging
//! ```

pub mod api;
pub mod auth;
pub mod broadcast;
pub mod core;
pub mod orders;
pub mod utils;

// Re-export public types
pub use broadcast::EventBroadcaster;
pub use core::{Config, Server, ServerState};
pub use orders::{OrderEngine, OrderStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: dotenv, logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present (ignored when missing)
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
