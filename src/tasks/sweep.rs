//! Cache Sweep Task
//!
//! Background task that periodically applies the eviction policy to the
//! query cache, dropping entries no screen has read within the policy's
//! window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{EvictionPolicy, QueryCache};

/// Spawns a background task that periodically sweeps the query cache.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. The returned handle can be used to abort the task when
/// the session ends.
pub fn spawn_sweep_task(
    cache: QueryCache,
    policy: Arc<dyn EvictionPolicy>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep(policy.as_ref()).await;

            if removed > 0 {
                info!("Cache sweep: removed {} idle entries", removed);
            } else {
                debug!("Cache sweep: nothing to evict");
            }
        }
    })
}
