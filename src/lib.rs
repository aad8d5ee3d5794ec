//! Caseboard - service core for a gift case platform admin dashboard
//!
//! Typed clients for the admin backend and the partners marketplace, a
//! query/mutation cache with invalidation, and the case composition rules.

pub mod api;
pub mod cache;
pub mod cases;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod service;
pub mod session;
pub mod tasks;

pub use config::Config;
pub use error::AdminError;
pub use service::AdminService;
pub use tasks::spawn_sweep_task;
