//! Required policy cache
//!
//! Consumers evaluate every required policy on each password change, so the
//! ordered list is worth keeping in memory. The cache asks the store for its
//! watermark on every read and only reloads the list when the watermark
//! differs from the one recorded at the last load.
//!
//! The watermark is `MAX(update_date)`, so deleting a policy other than the
//! most recently updated one does not move it. Call `invalidate` after such
//! deletes.
//!
//! A row stamped inside a transaction that commits after a newer stamp has
//! already become visible stays below the watermark as well. The PostgreSQL
//! repository stamps updates with `clock_timestamp()` to keep that window to
//! the time between the write and its commit; writers that hold long
//! transactions should `invalidate` after committing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::PortError;

use crate::policy::PasswordPolicy;
use crate::ports::PasswordPolicyPort;

#[derive(Debug, Clone)]
struct Snapshot {
    watermark: Option<DateTime<Utc>>,
    policies: Arc<Vec<PasswordPolicy>>,
}

/// Watermark-checked cache of the required policy list
pub struct RequiredPolicyCache {
    port: Arc<dyn PasswordPolicyPort>,
    snapshot: RwLock<Option<Snapshot>>,
    loads: AtomicU64,
}

impl RequiredPolicyCache {
    /// Creates an empty cache over the given port
    pub fn new(port: Arc<dyn PasswordPolicyPort>) -> Self {
        Self {
            port,
            snapshot: RwLock::new(None),
            loads: AtomicU64::new(0),
        }
    }

    /// Returns the required policies in priority order
    ///
    /// Store errors are passed through unchanged and leave the previous
    /// snapshot in place.
    pub async fn required_policies(&self) -> Result<Arc<Vec<PasswordPolicy>>, PortError> {
        let watermark = self.port.find_latest_update_date().await?;

        if let Some(policies) = self.fresh(&*self.snapshot.read().await, watermark) {
            return Ok(policies);
        }

        let mut guard = self.snapshot.write().await;
        // another task may have reloaded while we waited for the lock
        if let Some(policies) = self.fresh(&guard, watermark) {
            return Ok(policies);
        }

        let policies = Arc::new(self.port.find_required_policies_ordered_by_priority().await?);
        let loads = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            count = policies.len(),
            watermark = ?watermark,
            loads,
            "Reloaded required password policies"
        );

        *guard = Some(Snapshot {
            watermark,
            policies: Arc::clone(&policies),
        });
        Ok(policies)
    }

    /// Drops the snapshot so the next read reloads
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    /// Watermark recorded at the last load, `None` if nothing is cached or
    /// the store was empty
    pub async fn cached_watermark(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.as_ref().and_then(|s| s.watermark)
    }

    /// Number of times the list has been loaded from the store
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }

    fn fresh(
        &self,
        snapshot: &Option<Snapshot>,
        watermark: Option<DateTime<Utc>>,
    ) -> Option<Arc<Vec<PasswordPolicy>>> {
        snapshot
            .as_ref()
            .filter(|s| s.watermark == watermark)
            .map(|s| Arc::clone(&s.policies))
    }
}

impl std::fmt::Debug for RequiredPolicyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequiredPolicyCache")
            .field("loads", &self.load_count())
            .finish_non_exhaustive()
    }
}
