//! Background Tasks Module
//!
//! Contains the tasks that drive a cache from the tokio runtime.
//!
//! # Tasks
//! - Sweep timer: single cancelable timer that fires the next eviction sweep
//! - Deferred worker: runs removal callbacks outside of cache mutations

mod deferred;
mod timer;

pub use deferred::{spawn_deferred_worker, DeferredSender, DeferredTask};
pub use timer::{CycleTimer, FireFn};
