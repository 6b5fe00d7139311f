//! Deferred Callback Worker
//!
//! Background task that runs removal callbacks outside of cache mutations.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// A unit of work queued for the deferred worker.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Sending half of the deferred task queue.
pub type DeferredSender = mpsc::UnboundedSender<DeferredTask>;

/// Spawns the worker that drains the deferred task queue.
///
/// Tasks run one at a time in the order they were queued. A panicking task
/// is logged and skipped; the worker keeps draining. The worker stops once
/// every sender has been dropped.
///
/// # Returns
/// The queue sender and the JoinHandle of the worker.
pub fn spawn_deferred_worker(runtime: &Handle) -> (DeferredSender, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<DeferredTask>();

    let handle = runtime.spawn(async move {
        while let Some(task) = rx.recv().await {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                error!(
                    "Removal callback panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
        debug!("Deferred callback worker stopped");
    });

    (tx, handle)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_worker_runs_tasks_in_order() {
        let (tx, _handle) = spawn_deferred_worker(&Handle::current());
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let seen = Arc::clone(&seen);
            tx.send(Box::new(move || seen.lock().unwrap().push(i))).unwrap();
        }

        let (done_tx, done_rx) = oneshot::channel();
        tx.send(Box::new(move || {
            let _ = done_tx.send(());
        }))
        .unwrap();
        done_rx.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_worker_survives_panicking_task() {
        let (tx, handle) = spawn_deferred_worker(&Handle::current());

        tx.send(Box::new(|| panic!("callback failure"))).unwrap();

        let (done_tx, done_rx) = oneshot::channel();
        tx.send(Box::new(move || {
            let _ = done_tx.send(());
        }))
        .unwrap();

        done_rx.await.expect("Task after a panic should still run");
        assert!(!handle.is_finished());
    }

    #[tokio::test]
    async fn test_worker_stops_when_sender_dropped() {
        let (tx, handle) = spawn_deferred_worker(&Handle::current());
        drop(tx);

        handle.await.unwrap();
    }

    #[test]
    fn test_panic_message_variants() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
    }
}
