//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the dashboard is
//! open.
//!
//! # Tasks
//! - Cache sweep: applies the eviction policy to the query cache at
//!   configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
