//! Worker thread placement
//!
//! The feed and strategy threads spin on opposite ends of the ring. Keeping
//! each on its own core stops the cursor cache lines from following a thread
//! the scheduler just migrated.

use anyhow::Result;
use core_affinity::CoreId;

/// Bind the calling thread to `core`
///
/// Fails when the id is not one of the cores this process may run on.
pub fn pin_to_core(core: usize) -> Result<()> {
    let available = core_affinity::get_core_ids().unwrap_or_default();
    if !available.is_empty() && !available.iter().any(|id| id.id == core) {
        anyhow::bail!(
            "core {} not available ({} cores usable)",
            core,
            available.len()
        );
    }

    if core_affinity::set_for_current(CoreId { id: core }) {
        tracing::info!(core, "Thread pinned");
        Ok(())
    } else {
        anyhow::bail!("affinity call refused for core {}", core)
    }
}

/// Pin a pipeline worker if its config names a core
///
/// A refused pin only logs; the worker runs unpinned.
pub fn pin_worker(worker: &str, core: Option<usize>) {
    if let Some(core) = core {
        if let Err(e) = pin_to_core(core) {
            tracing::warn!(worker, "Running unpinned: {}", e);
        }
    }
}

/// Move the calling thread to `SCHED_FIFO` at `priority`
///
/// Needs CAP_SYS_NICE.
#[cfg(target_os = "linux")]
pub fn set_realtime_priority(priority: i32) -> Result<()> {
    use libc::{sched_param, sched_setscheduler, SCHED_FIFO};

    let param = sched_param {
        sched_priority: priority,
    };

    // SAFETY: pid 0 targets the calling thread and `param` outlives the call.
    let rc = unsafe { sched_setscheduler(0, SCHED_FIFO, &param) };

    if rc == 0 {
        tracing::info!(priority, "SCHED_FIFO enabled");
        Ok(())
    } else {
        anyhow::bail!(
            "sched_setscheduler failed: {}",
            std::io::Error::last_os_error()
        )
    }
}

#[cfg(not(target_os = "linux"))]
pub fn set_realtime_priority(_priority: i32) -> Result<()> {
    tracing::warn!("SCHED_FIFO unavailable on this platform");
    Ok(())
}
