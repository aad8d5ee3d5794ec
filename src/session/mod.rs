//! Session state
//!
//! Process-wide mutable state shared by every screen: the persisted admin
//! token and the toast notification queue. Both are mutated only through
//! their named actions and handed around behind `Arc`.

pub mod auth;
pub mod toasts;

pub use auth::AuthStore;
pub use toasts::{Toast, ToastLevel, ToastQueue};
