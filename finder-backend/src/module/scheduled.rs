///! Scheduled task manager - Centralize all periodic tasks
///!
///! Currently a single task: re-reading the catalog export so changes made by
///! the storage layer show up without a restart.

use super::catalog::CatalogStore;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Configuration for scheduled tasks
#[derive(Debug, Clone, Default)]
pub struct ScheduledTaskConfig {
    /// Interval for catalog reloads (in minutes), 0 disables the task
    pub catalog_reload_interval_minutes: u64,
}

/// Scheduled task manager
pub struct ScheduledTaskManager {
    config: ScheduledTaskConfig,
    catalog: Arc<CatalogStore>,
    task_handles: Vec<JoinHandle<()>>,
}

impl ScheduledTaskManager {
    pub fn new(config: ScheduledTaskConfig, catalog: Arc<CatalogStore>) -> Self {
        Self {
            config,
            catalog,
            task_handles: Vec::new(),
        }
    }

    /// Start all scheduled tasks
    pub fn start_all(&mut self) {
        tracing::info!("Starting scheduled task manager...");

        if let Some(handle) = self.start_catalog_reload_task() {
            self.task_handles.push(handle);
        }

        tracing::info!("Started {} scheduled tasks", self.task_handles.len());
    }

    pub fn running_tasks(&self) -> usize {
        self.task_handles.len()
    }

    fn start_catalog_reload_task(&self) -> Option<JoinHandle<()>> {
        let interval_minutes = self.config.catalog_reload_interval_minutes;
        if interval_minutes == 0 {
            tracing::info!("Catalog reload disabled");
            return None;
        }

        tracing::info!(
            "Scheduling catalog reload task (interval: {} minutes)",
            interval_minutes
        );

        let catalog = self.catalog.clone();
        Some(tokio::spawn(async move {
            Self::catalog_reload_loop(catalog, interval_minutes).await;
        }))
    }

    async fn catalog_reload_loop(catalog: Arc<CatalogStore>, interval_minutes: u64) {
        loop {
            let now = Utc::now();
            let next_trigger = Self::calculate_next_reload_time(now, interval_minutes);
            let sleep_duration = (next_trigger - now)
                .to_std()
                .unwrap_or(Duration::from_secs(60));

            tracing::debug!(
                "Next catalog reload at: {} (in {:.1} min)",
                next_trigger.format("%Y-%m-%d %H:%M:%S UTC"),
                sleep_duration.as_secs_f64() / 60.0
            );

            tokio::time::sleep(sleep_duration).await;

            // The store logs failures and keeps serving the previous snapshot
            if let Ok(count) = catalog.reload().await {
                tracing::debug!("Scheduled catalog reload finished ({} creatures)", count);
            }
        }
    }

    /// Next wall-clock boundary that is a multiple of `interval_minutes` since midnight UTC
    fn calculate_next_reload_time(now: DateTime<Utc>, interval_minutes: u64) -> DateTime<Utc> {
        let interval = interval_minutes.max(1) as i64;
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let elapsed = (now.hour() * 60 + now.minute()) as i64;
        let next = (elapsed / interval + 1) * interval;

        midnight + ChronoDuration::minutes(next)
    }

    /// Gracefully shutdown all tasks
    pub async fn shutdown(self) {
        tracing::info!("Shutting down scheduled task manager...");

        for handle in self.task_handles {
            handle.abort();
        }

        tracing::info!("All scheduled tasks stopped");
    }
}
