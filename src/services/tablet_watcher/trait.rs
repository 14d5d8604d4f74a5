use crate::config::Config;
use crate::error::Result;
use crate::services::platform::PlatformProbe;
use crate::settings::Settings;
use std::sync::Arc;

/// Trait for tablet-mode watchers that can run in different modes
#[async_trait::async_trait]
pub trait TabletWatcherTrait {
    /// Run the watcher
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate watcher based on the dry_run flag
pub fn create_tablet_watcher(
    config: Arc<Config>,
    settings: Arc<Settings>,
    platform: Arc<dyn PlatformProbe>,
    dry_run: bool,
) -> Result<Box<dyn TabletWatcherTrait + Send>> {
    if dry_run {
        Ok(Box::new(
            super::dry_tablet_watcher::DryRunTabletWatcher::new(settings),
        ))
    } else {
        Ok(Box::new(super::tablet_watcher::RealTabletWatcher::new(
            config, settings, platform,
        )))
    }
}
