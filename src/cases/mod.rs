//! Case composition
//!
//! Pure, synchronous editing state for the case creation form: the reward
//! selection with its drop-chance bookkeeping, and the draft that turns a
//! finished selection into a create-case request.

pub mod draft;
pub mod selection;

pub use draft::CaseDraft;
pub use selection::{RewardEntry, RewardSelection};

// == Public Constants ==
/// Drop chance given to a freshly selected reward item
pub const DEFAULT_DROP_CHANCE: f64 = 10.0;

/// Tolerance around 100% accepted for the drop-chance sum
pub const CHANCE_TOLERANCE: f64 = 0.01;
