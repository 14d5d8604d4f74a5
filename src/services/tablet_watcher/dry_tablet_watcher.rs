use super::r#trait::TabletWatcherTrait;
use crate::error::Result;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

pub struct DryRunTabletWatcher {
    settings: Arc<Settings>,
}

impl DryRunTabletWatcher {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    async fn run_impl(self) -> Result<()> {
        info!("Dry-run mode - TabletWatcher emulates mode transitions");

        self.settings.set_tablet_mode_available(true);

        let mut tablet_mode = false;
        let mut interval = interval(Duration::from_secs(15));

        loop {
            interval.tick().await;

            tablet_mode = !tablet_mode;
            info!("Dry-run: emulating tablet mode = {}", tablet_mode);
            self.settings.set_tablet_mode(tablet_mode);
        }
    }
}

#[async_trait::async_trait]
impl TabletWatcherTrait for DryRunTabletWatcher {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
