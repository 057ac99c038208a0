use hub_schema_cache::SchemaStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub struct RefreshSchedule {
    /// `None` disables the periodic refresh
    pub interval: Option<Duration>,
    /// `None` disables the startup warm-up
    pub warmup_delay: Option<Duration>,
}

/// Background warm-up and periodic refresh; failures are logged and retried next period
pub fn spawn_refresh_task(store: Arc<SchemaStore>, schedule: RefreshSchedule) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(delay) = schedule.warmup_delay {
            tokio::time::sleep(delay).await;
            log::info!("Warming up schema cache");
            if let Err(e) = store.get_schema().await {
                log::warn!("Schema warm-up failed, will load on first use: {e}");
            }
        }

        let Some(period) = schedule.interval else {
            return;
        };

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            log::info!("Starting scheduled schema cache refresh");
            let started = Instant::now();
            match store.refresh().await {
                Ok(schema) => log::info!(
                    "Schema cache refresh completed in {:?} (generation {})",
                    started.elapsed(),
                    schema.generation()
                ),
                Err(e) => log::error!("Schema cache refresh failed: {e}"),
            }
        }
    })
}
