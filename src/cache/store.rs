//! Cache Store Module
//!
//! Main cache engine: the namespace registry, the global TTL queue and the
//! eviction scheduler that sweeps it.
//!
//! The scheduler keeps exactly one timer armed. Each sweep evicts every entry
//! whose deathtime falls within `cycle_accuracy` of now, then re-arms for the
//! next pending deathtime, or for `cycle_time` when nothing is due sooner.
//! Setting a TTL that dies before the armed deadline pulls the timer in.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::entry::{Entry, Expiry};
use crate::cache::namespace::Slot;
use crate::cache::queue::{TtlQueue, TtlRef};
use crate::cache::registry::Registry;
use crate::cache::{
    normalize_name, CacheStats, EntryView, Namespace, RemovalCallback, SetOptions,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_deferred_worker, CycleTimer, DeferredSender};

// == Pending Removal ==
/// A removal callback waiting to be handed to the deferred worker.
pub(crate) struct PendingRemoval<V> {
    callback: RemovalCallback<V>,
    namespace: String,
    key: String,
    value: V,
}

impl<V> PendingRemoval<V> {
    /// Consumes a detached entry, keeping its callback arguments if it has one.
    fn from_entry(namespace: &str, entry: Entry<V>) -> Option<Self> {
        let callback = entry.on_remove?;
        Some(Self {
            callback,
            namespace: namespace.to_string(),
            key: entry.key,
            value: entry.value,
        })
    }
}

// == Cache State ==
/// Everything a cache owns, guarded by a single lock.
pub(crate) struct CacheState<V> {
    cycle_time: Duration,
    cycle_accuracy: Duration,
    next_cycle_deadline: Instant,
    ttl_queue: TtlQueue,
    slots: Registry<Slot<V>>,
    last_version: u64,
    stats: CacheStats,
    timer: CycleTimer,
}

impl<V> CacheState<V> {
    fn new(cycle_time: Duration, cycle_accuracy: Duration, timer: CycleTimer) -> Self {
        Self {
            cycle_time,
            cycle_accuracy,
            next_cycle_deadline: Instant::now(),
            ttl_queue: TtlQueue::new(),
            slots: Registry::new(),
            last_version: 0,
            stats: CacheStats::new(),
            timer,
        }
    }

    // == Rearm ==
    /// Cancels the outstanding timer and arms the next sweep `delay` from `now`.
    ///
    /// A deadline past the clock range keeps the previous one.
    fn rearm(&mut self, now: Instant, delay: Duration) {
        if let Some(deadline) = now.checked_add(delay) {
            self.next_cycle_deadline = deadline;
        }
        self.timer.arm(delay);
    }

    fn slot_mut(&mut self, namespace: &str) -> &mut Slot<V> {
        self.slots
            .get_or_insert_with(namespace, Slot::new)
    }

    fn next_version(&mut self) -> u64 {
        self.last_version += 1;
        self.last_version
    }

    // == Set ==
    fn set_entry(
        &mut self,
        namespace: &str,
        key: String,
        value: V,
        options: SetOptions<V>,
        now: Instant,
    ) -> Result<()> {
        let SetOptions { ttl, on_remove } = options;
        let expiry = ttl.map(|ttl| Expiry::new(now, ttl)).transpose()?;
        let armed = expiry.map(|expiry| (expiry, self.next_version()));

        let entry = self.slot_mut(namespace).upsert(&key, value);
        if let Some(callback) = on_remove {
            entry.on_remove = Some(callback);
        }
        let Some((expiry, version)) = armed else {
            return Ok(());
        };
        entry.expiry = Some(expiry);
        entry.version = version;

        self.ttl_queue.push(TtlRef {
            deathtime: expiry.deathtime,
            version,
            namespace: namespace.to_string(),
            key,
        });

        if expiry.deathtime < self.next_cycle_deadline {
            debug!(
                "Entry dies before next sweep, rescheduling sweep in {:?}",
                expiry.ttl
            );
            self.rearm(now, expiry.ttl);
        }
        Ok(())
    }

    // == Get ==
    fn lookup(&mut self, namespace: &str, key: &str) -> Option<&Entry<V>> {
        let hit = self.slot_mut(namespace).get(key).is_some();
        self.stats.record_lookup(hit);
        self.slots.get(namespace).and_then(|slot| slot.get(key))
    }

    // == Remove ==
    fn take(&mut self, namespace: &str, key: &str) -> Option<Entry<V>> {
        self.slots.get_mut(namespace).and_then(|slot| slot.take(key))
    }

    /// A queue reference is live while its entry still exists and carries the
    /// version the reference was issued for.
    fn is_live(&self, ttl_ref: &TtlRef) -> bool {
        self.slots
            .get(&ttl_ref.namespace)
            .and_then(|slot| slot.get(&ttl_ref.key))
            .is_some_and(|entry| entry.version == ttl_ref.version && entry.expiry.is_some())
    }

    // == Sweep ==
    /// Evicts every due entry and re-arms the timer.
    ///
    /// Returns the removal callbacks of the evicted entries, in eviction order.
    fn sweep(&mut self, now: Instant) -> Vec<PendingRemoval<V>> {
        let mut removals = Vec::new();
        let mut evicted = 0usize;
        let mut candidate = None;

        while let Some(ttl_ref) = self.ttl_queue.pop_earliest() {
            if !self.is_live(&ttl_ref) {
                continue;
            }

            let remaining = ttl_ref.deathtime.saturating_duration_since(now);
            if remaining > self.cycle_accuracy {
                // Everything behind this reference dies even later
                self.ttl_queue.push(ttl_ref);
                candidate = Some(remaining);
                break;
            }

            if let Some(entry) = self.take(&ttl_ref.namespace, &ttl_ref.key) {
                evicted += 1;
                self.stats.record_expiration();
                removals.extend(PendingRemoval::from_entry(&ttl_ref.namespace, entry));
            }
        }

        let delay = match candidate {
            Some(remaining) if !remaining.is_zero() && remaining < self.cycle_time => remaining,
            _ => self.cycle_time,
        };
        self.stats.record_sweep();
        self.rearm(now, delay);

        debug!(
            "Sweep: evicted {} entries, {} queued, next sweep in {:?}",
            evicted,
            self.ttl_queue.len(),
            delay
        );
        removals
    }

    fn snapshot_stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.slots.values().map(|slot| slot.count()).sum();
        stats.pending_ttl_refs = self.ttl_queue.len();
        stats
    }
}

// == Shared ==
struct Shared<V> {
    state: Mutex<CacheState<V>>,
    deferred: DeferredSender,
}

// == Cache ==
/// In-memory key/value cache partitioned into namespaces, with per-entry TTL
/// eviction.
///
/// `Cache` is a cheap handle; clones share the same storage and timer. It
/// must be created inside a tokio runtime, which drives the sweep timer and
/// the removal callbacks. Removal callbacks never run inside `set`, `remove`
/// or a sweep; they are queued and run afterwards, one at a time.
///
/// # Example
/// ```ignore
/// let cache: Cache<String> = Cache::new(CacheConfig::default())?;
/// cache.set("sessions", "abc", "alice".to_string(),
///     SetOptions::new().ttl(Duration::from_secs(60)))?;
/// assert_eq!(cache.get("sessions", "abc")?, Some("alice".to_string()));
/// ```
pub struct Cache<V> {
    shared: Arc<Shared<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V> Cache<V> {
    /// True when both handles point at the same cache.
    pub fn same_cache(&self, other: &Cache<V>) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and arms its first sweep `cycle_time` from now.
    ///
    /// # Errors
    /// - [`CacheError::InvalidConfig`] for non-positive timings
    /// - [`CacheError::NoRuntime`] when called outside a tokio runtime
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let cycle_time = config.cycle_time()?;
        let cycle_accuracy = config.cycle_accuracy()?;
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let (deferred, _worker) = spawn_deferred_worker(&runtime);

        let shared = Arc::new_cyclic(|weak: &Weak<Shared<V>>| {
            let weak = weak.clone();
            let timer = CycleTimer::new(
                runtime.clone(),
                Arc::new(move |generation| {
                    if let Some(shared) = weak.upgrade() {
                        Cache { shared }.run_cycle(generation);
                    }
                }),
            );
            Shared {
                state: Mutex::new(CacheState::new(cycle_time, cycle_accuracy, timer)),
                deferred,
            }
        });

        shared.state.lock().rearm(Instant::now(), cycle_time);

        info!(
            "Slot cache created: cycle_time={:?}, cycle_accuracy={:?}",
            cycle_time, cycle_accuracy
        );
        Ok(Self { shared })
    }

    /// Creates a cache with the default timings (1800 s / 1 s).
    pub fn with_defaults() -> Result<Self> {
        Self::new(CacheConfig::default())
    }

    // == Set ==
    /// Stores `value` under (`namespace`, `key`).
    ///
    /// Names are converted with `Display` and trimmed. The namespace is
    /// created if needed. An existing entry is updated in place: its value is
    /// always replaced, its TTL only when `options` carries one, and its
    /// callback only when `options` carries one.
    ///
    /// # Errors
    /// [`CacheError::InvalidName`] if either name is blank,
    /// [`CacheError::InvalidTtl`] if the TTL reaches past the clock's range.
    pub fn set(
        &self,
        namespace: impl fmt::Display,
        key: impl fmt::Display,
        value: V,
        options: SetOptions<V>,
    ) -> Result<()> {
        let namespace = normalize_name("namespace", namespace)?;
        let key = normalize_name("key", key)?;
        self.set_in(&namespace, key, value, options)
    }

    // == Get ==
    /// Returns the value under (`namespace`, `key`), if any.
    ///
    /// Like `set`, this registers `namespace` if it did not exist yet.
    pub fn get(&self, namespace: impl fmt::Display, key: impl fmt::Display) -> Result<Option<V>> {
        let namespace = normalize_name("namespace", namespace)?;
        let key = normalize_name("key", key)?;
        Ok(self.get_in(&namespace, &key))
    }

    /// Like [`get`](Self::get), also handing the result to `callback` before
    /// returning.
    pub fn get_with<F>(
        &self,
        namespace: impl fmt::Display,
        key: impl fmt::Display,
        callback: F,
    ) -> Result<Option<V>>
    where
        F: FnOnce(Option<&V>),
    {
        let value = self.get(namespace, key)?;
        callback(value.as_ref());
        Ok(value)
    }

    // == Remove ==
    /// Removes (`namespace`, `key`) and returns what was stored.
    ///
    /// The entry's removal callback, if any, is queued. Unknown namespaces or
    /// keys are left alone and yield `None`.
    pub fn remove(
        &self,
        namespace: impl fmt::Display,
        key: impl fmt::Display,
    ) -> Result<Option<EntryView<V>>> {
        let namespace = normalize_name("namespace", namespace)?;
        let key = normalize_name("key", key)?;
        Ok(self.remove_in(&namespace, &key))
    }

    // == Namespaces ==
    /// Snapshot of the namespace names, in creation order.
    pub fn list_namespaces(&self) -> Vec<String> {
        self.shared.state.lock().slots.keys()
    }

    /// Returns a handle to `name`, registering the namespace if needed.
    pub fn namespace(&self, name: impl fmt::Display) -> Result<Namespace<V>> {
        let name = normalize_name("namespace", name)?;
        self.shared.state.lock().slot_mut(&name);
        Ok(Namespace::new(name, self.clone()))
    }

    // == Introspection ==
    pub fn stats(&self) -> CacheStats {
        self.shared.state.lock().snapshot_stats()
    }

    /// When the next sweep is due.
    pub fn next_cycle_deadline(&self) -> Instant {
        self.shared.state.lock().next_cycle_deadline
    }

    pub fn cycle_time(&self) -> Duration {
        self.shared.state.lock().cycle_time
    }

    pub fn cycle_accuracy(&self) -> Duration {
        self.shared.state.lock().cycle_accuracy
    }

    // == Namespace-scoped internals ==
    pub(crate) fn set_in(
        &self,
        namespace: &str,
        key: String,
        value: V,
        options: SetOptions<V>,
    ) -> Result<()> {
        let now = Instant::now();
        self.shared
            .state
            .lock()
            .set_entry(namespace, key, value, options, now)
    }

    pub(crate) fn get_in(&self, namespace: &str, key: &str) -> Option<V> {
        self.shared
            .state
            .lock()
            .lookup(namespace, key)
            .map(|entry| entry.value.clone())
    }

    pub(crate) fn remove_in(&self, namespace: &str, key: &str) -> Option<EntryView<V>> {
        let (view, removal) = {
            let mut state = self.shared.state.lock();
            let entry = state.take(namespace, key)?;
            state.stats.record_removal();
            (entry.view(), PendingRemoval::from_entry(namespace, entry))
        };
        self.dispatch(removal);
        Some(view)
    }

    pub(crate) fn count_in(&self, namespace: &str) -> usize {
        self.shared
            .state
            .lock()
            .slots
            .get(namespace)
            .map_or(0, |slot| slot.count())
    }

    pub(crate) fn keys_in(&self, namespace: &str) -> Vec<String> {
        self.shared
            .state
            .lock()
            .slots
            .get(namespace)
            .map(|slot| slot.keys())
            .unwrap_or_default()
    }

    // == Cycle ==
    /// Timer callback: sweeps unless this timer was superseded meanwhile.
    fn run_cycle(&self, generation: u64) {
        let removals = {
            let mut state = self.shared.state.lock();
            if !state.timer.is_current(generation) {
                return;
            }
            state.sweep(Instant::now())
        };
        self.dispatch(removals);
    }

    /// Queues removal callbacks on the deferred worker.
    fn dispatch(&self, removals: impl IntoIterator<Item = PendingRemoval<V>>) {
        for removal in removals {
            let PendingRemoval {
                callback,
                namespace,
                key,
                value,
            } = removal;
            let handle = Namespace::new(namespace, self.clone());
            let task = Box::new(move || callback(handle, key, value));
            if self.shared.deferred.send(task).is_err() {
                warn!("Deferred callback worker is gone, dropping removal callback");
            }
        }
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Cache")
            .field("cycle_time", &state.cycle_time)
            .field("cycle_accuracy", &state.cycle_accuracy)
            .field("namespaces", &state.slots.count())
            .field("pending_ttl_refs", &state.ttl_queue.len())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    fn fast_config() -> CacheConfig {
        CacheConfig::new(1800.0, 0.001)
    }

    /// Paused-clock deadlines land on millisecond ticks
    fn assert_near(actual: Instant, expected: Instant) {
        let diff = if actual > expected {
            actual - expected
        } else {
            expected - actual
        };
        assert!(
            diff <= Duration::from_millis(1),
            "deadline off by {:?}",
            diff
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_arms_first_sweep_at_cycle_time() {
        let cache: Cache<u32> = Cache::with_defaults().unwrap();
        let expected = Instant::now() + Duration::from_secs(1800);

        assert_eq!(cache.next_cycle_deadline(), expected);
        assert_eq!(cache.cycle_time(), Duration::from_secs(1800));
        assert_eq!(cache.cycle_accuracy(), Duration::from_secs(1));
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result: Result<Cache<u32>> = Cache::with_defaults();
        assert!(matches!(result, Err(CacheError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_new_rejects_non_positive_config() {
        let result: Result<Cache<u32>> = Cache::new(CacheConfig::new(0.0, 1.0));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));

        let result: Result<Cache<u32>> = Cache::new(CacheConfig::new(10.0, -1.0));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache: Cache<String> = Cache::new(fast_config()).unwrap();

        cache
            .set("a_slot", "a_key", "value".to_string(), SetOptions::new())
            .unwrap();

        assert_eq!(cache.get("a_slot", "a_key").unwrap(), Some("value".to_string()));
        assert_eq!(cache.namespace("a_slot").unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_names_are_trimmed_and_stringified() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();

        cache.set("  slot ", 42, 1, SetOptions::new()).unwrap();

        assert_eq!(cache.get("slot", "42").unwrap(), Some(1));
        assert_eq!(cache.list_namespaces(), vec!["slot"]);
    }

    #[tokio::test]
    async fn test_blank_names_rejected() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();

        let result = cache.set("", "k", 1, SetOptions::new());
        assert!(matches!(result, Err(CacheError::InvalidName { kind: "namespace", .. })));

        let result = cache.get("s", " \t ");
        assert!(matches!(result, Err(CacheError::InvalidName { kind: "key", .. })));

        assert!(cache.list_namespaces().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_creates_namespace() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();

        assert_eq!(cache.get("ghost", "k").unwrap(), None);
        assert_eq!(cache.list_namespaces(), vec!["ghost"]);
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        cache.set("s", "k", 1, SetOptions::new()).unwrap();

        assert!(cache.remove("s", "other").unwrap().is_none());
        assert!(cache.remove("nowhere", "k").unwrap().is_none());
        assert_eq!(cache.namespace("s").unwrap().count(), 1);
        assert_eq!(cache.stats().removals, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shorter_ttl_pulls_sweep_in() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        let start = Instant::now();

        cache
            .set("s", "k", 1, SetOptions::new().ttl(Duration::from_secs(60)))
            .unwrap();
        assert_eq!(cache.next_cycle_deadline(), start + Duration::from_secs(60));

        // A later deathtime leaves the armed sweep alone
        cache
            .set("s", "other", 2, SetOptions::new().ttl(Duration::from_secs(120)))
            .unwrap();
        assert_eq!(cache.next_cycle_deadline(), start + Duration::from_secs(60));

        cache
            .set("s", "k", 3, SetOptions::new().ttl(Duration::from_secs(5)))
            .unwrap();
        assert_eq!(cache.next_cycle_deadline(), start + Duration::from_secs(5));
        assert_eq!(cache.namespace("s").unwrap().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_rearms_for_next_pending_entry() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        let start = Instant::now();

        cache
            .set("s", "a", 1, SetOptions::new().ttl(Duration::from_millis(10)))
            .unwrap();
        cache
            .set("s", "b", 2, SetOptions::new().ttl(Duration::from_millis(40)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(15)).await;

        assert_eq!(cache.get("s", "a").unwrap(), None);
        assert_eq!(cache.get("s", "b").unwrap(), Some(2));
        assert_near(cache.next_cycle_deadline(), start + Duration::from_millis(40));

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("s", "b").unwrap(), None);
        assert_near(
            cache.next_cycle_deadline(),
            start + Duration::from_millis(40) + Duration::from_secs(1800),
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_accuracy_window_allows_early_eviction() {
        let cache: Cache<u32> = Cache::new(CacheConfig::new(1800.0, 0.05)).unwrap();

        cache
            .set("s", "a", 1, SetOptions::new().ttl(Duration::from_millis(10)))
            .unwrap();
        // Within 50ms of the first deathtime, so evicted by the same sweep
        cache
            .set("s", "b", 2, SetOptions::new().ttl(Duration::from_millis(40)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(11)).await;

        assert_eq!(cache.namespace("s").unwrap().count(), 0);
        assert_eq!(cache.stats().sweeps, 1);
        assert_eq!(cache.stats().expirations, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_entry_reference_is_stale() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        cache
            .set(
                "s",
                "k",
                1,
                SetOptions::new()
                    .ttl(Duration::from_millis(10))
                    .on_remove(move |_, key, value| {
                        let _ = tx.send((key, value));
                    }),
            )
            .unwrap();
        cache.remove("s", "k").unwrap();
        assert_eq!(rx.recv().await, Some(("k".to_string(), 1)));

        // Same key re-created without a TTL must survive the old reference
        cache.set("s", "k", 2, SetOptions::new()).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("s", "k").unwrap(), Some(2));
        assert_eq!(cache.stats().expirations, 0);
        assert_eq!(cache.stats().pending_ttl_refs, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearmed_entry_ignores_superseded_reference() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        cache
            .set(
                "s",
                "k",
                1,
                SetOptions::new()
                    .ttl(Duration::from_millis(10))
                    .on_remove(move |_, _, _| {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .unwrap();
        // Extend the lifetime before the first deathtime
        cache
            .set("s", "k", 2, SetOptions::new().ttl(Duration::from_millis(100)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("s", "k").unwrap(), Some(2));

        tokio::time::sleep(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;
        assert_eq!(cache.get("s", "k").unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_without_ttl_keeps_previous_expiry() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();

        cache
            .set("s", "k", 1, SetOptions::new().ttl(Duration::from_millis(10)))
            .unwrap();
        cache.set("s", "k", 2, SetOptions::new()).unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("s", "k").unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_returns_view() {
        let cache: Cache<String> = Cache::new(fast_config()).unwrap();
        cache
            .set(
                "s",
                "k",
                "v".to_string(),
                SetOptions::new().ttl(Duration::from_secs(30)),
            )
            .unwrap();

        let view = cache.remove("s", "k").unwrap().unwrap();
        assert_eq!(view.key, "k");
        assert_eq!(view.value, "v");
        assert_eq!(view.ttl, Some(Duration::from_secs(30)));
        assert!(view.expires_at.is_some());
        assert_eq!(cache.stats().removals, 1);
    }

    #[tokio::test]
    async fn test_stats_track_lookups_and_entries() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        cache.set("a", "k", 1, SetOptions::new()).unwrap();
        cache.set("b", "k", 2, SetOptions::new()).unwrap();

        cache.get("a", "k").unwrap();
        cache.get("a", "missing").unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[tokio::test]
    async fn test_debug_output() {
        let cache: Cache<u32> = Cache::new(fast_config()).unwrap();
        cache.set("a", "k", 1, SetOptions::new()).unwrap();

        let debug = format!("{:?}", cache);
        assert!(debug.contains("namespaces: 1"));
    }
}
