use super::r#trait::FocusTrackerTrait;
use crate::error::Result;
use crate::events::{WindowEvent, WindowInfo};
use crate::services::focus_context::FocusContext;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

pub struct DryRunFocusTracker {
    focus: Arc<dyn FocusContext>,
}

impl DryRunFocusTracker {
    pub fn new(focus: Arc<dyn FocusContext>) -> Self {
        Self { focus }
    }

    async fn run_impl(self) -> Result<()> {
        info!("Dry-run mode - FocusTracker emulates focus changes");

        let fake_windows = [
            "Terminal - dry_run",
            "Browser - dry_run",
            "Editor - dry_run",
        ];

        let mut window_index = 0;
        let mut interval = interval(Duration::from_secs(10));

        loop {
            interval.tick().await;

            let fake_window = WindowInfo::new(fake_windows[window_index].to_string())
                .with_class("DryRun".to_string());

            info!("Dry-run: emulating focus change to: {}", fake_window.title);
            self.focus
                .handle_window_event(&WindowEvent::focus_changed(fake_window));

            window_index = (window_index + 1) % fake_windows.len();
        }
    }
}

#[async_trait::async_trait]
impl FocusTrackerTrait for DryRunFocusTracker {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
