//! Slot Cache - demo runner
//!
//! Fills a cache with short-lived session entries and reports evictions and
//! statistics until interrupted.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slot_cache::{Cache, CacheConfig, SetOptions};

/// Main entry point for the demo runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache (arms the first sweep)
/// 4. Write entries with staggered TTLs and a logging removal callback
/// 5. Log statistics every few seconds until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slot_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: cycle_time={}s, cycle_accuracy={}s",
        config.cycle_time, config.cycle_accuracy
    );

    let cache: Cache<String> = Cache::new(config).context("failed to create cache")?;

    for (i, ttl_secs) in [1u64, 2, 3, 5, 8].into_iter().enumerate() {
        let options = SetOptions::new()
            .ttl(Duration::from_secs(ttl_secs))
            .on_remove(|ns, key, value| {
                info!(
                    "Evicted {}/{} ({}), {} left in namespace",
                    ns.name(),
                    key,
                    value,
                    ns.count()
                );
            });
        cache.set("sessions", format!("user-{}", i), format!("token-{}", ttl_secs), options)?;
    }
    cache.set("settings", "theme", "dark".to_string(), SetOptions::new())?;
    info!("Namespaces: {:?}", cache.list_namespaces());

    let reporter = {
        let cache = cache.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(2));
            loop {
                tick.tick().await;
                match serde_json::to_string(&cache.stats()) {
                    Ok(stats) => info!("Stats: {}", stats),
                    Err(e) => warn!("Failed to serialize stats: {}", e),
                }
            }
        })
    };

    shutdown_signal().await;
    reporter.abort();

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
