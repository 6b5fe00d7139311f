//! Sweep Timer
//!
//! Owns the single outstanding eviction timer of a cache. Arming the timer
//! always cancels the previous one first.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Invoked with the generation of the timer that fired.
pub type FireFn = Arc<dyn Fn(u64) + Send + Sync>;

/// Cancelable one-shot timer that re-arms on demand.
///
/// Each arm bumps a generation counter. A timer that was cancelled after it
/// already woke up still calls `on_fire`, so receivers must compare the
/// generation they get with [`is_current`](CycleTimer::is_current).
pub struct CycleTimer {
    runtime: Handle,
    on_fire: FireFn,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl CycleTimer {
    pub fn new(runtime: Handle, on_fire: FireFn) -> Self {
        Self {
            runtime,
            on_fire,
            generation: 0,
            handle: None,
        }
    }

    /// Cancels the outstanding timer and arms a new one for `delay`.
    pub fn arm(&mut self, delay: Duration) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let on_fire = Arc::clone(&self.on_fire);
        self.handle = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(generation);
        }));
        generation
    }

    /// Aborts the outstanding timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CycleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for CycleTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CycleTimer")
            .field("generation", &self.generation)
            .field("armed", &self.handle.is_some())
            .finish()
    }
}
