use super::r#trait::TabletWatcherTrait;
use crate::config::Config;
use crate::error::Result;
use crate::services::platform::PlatformProbe;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

/// Polls the platform probe and pushes both tablet flags through the
/// settings setters. Unchanged values are dropped there, so a poll tick
/// with no transition is silent.
pub struct RealTabletWatcher {
    config: Arc<Config>,
    settings: Arc<Settings>,
    platform: Arc<dyn PlatformProbe>,
}

impl RealTabletWatcher {
    pub fn new(
        config: Arc<Config>,
        settings: Arc<Settings>,
        platform: Arc<dyn PlatformProbe>,
    ) -> Self {
        info!("Initializing RealTabletWatcher");
        Self {
            config,
            settings,
            platform,
        }
    }

    async fn run_impl(self) -> Result<()> {
        let mut interval = interval(Duration::from_millis(self.config.watcher.poll_interval_ms));
        info!(
            "RealTabletWatcher running, poll interval {}ms",
            self.config.watcher.poll_interval_ms
        );

        loop {
            interval.tick().await;

            let available = self.platform.tablet_mode_available().await;
            let mode = self.platform.tablet_mode().await;

            self.settings.set_tablet_mode_available(available);
            self.settings.set_tablet_mode(mode);
        }
    }
}

impl Drop for RealTabletWatcher {
    fn drop(&mut self) {
        info!("RealTabletWatcher shutting down");
    }
}

#[async_trait::async_trait]
impl TabletWatcherTrait for RealTabletWatcher {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
