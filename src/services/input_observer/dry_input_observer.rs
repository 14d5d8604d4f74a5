use super::r#trait::InputObserverTrait;
use crate::error::Result;
use crate::events::InputEvent;
use crate::services::focus_context::FocusContext;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

pub struct DryRunInputObserver {
    settings: Arc<Settings>,
    focus: Arc<dyn FocusContext>,
}

impl DryRunInputObserver {
    pub fn new(settings: Arc<Settings>, focus: Arc<dyn FocusContext>) -> Self {
        Self { settings, focus }
    }

    async fn run_impl(self) -> Result<()> {
        info!("Dry-run mode - InputObserver emulates an input sequence");

        let script = [
            InputEvent::TouchBegin,
            InputEvent::synthesized_press(),
            InputEvent::Wheel,
            InputEvent::physical_press(),
        ];

        let mut index = 0;
        let mut interval = interval(Duration::from_secs(5));

        loop {
            interval.tick().await;

            if !self.focus.is_attached() {
                debug!("Dry-run: no focused window, skipping input emulation");
                continue;
            }

            let window = self
                .focus
                .focused_window()
                .map(|w| w.title)
                .unwrap_or_else(|| "Unknown".to_string());
            let event = script[index];
            let before = self.settings.has_transient_touch_input();
            self.settings.handle_input_event(&event);
            info!(
                "Dry-run: emulated {} in \"{}\" (transient touch: {} -> {})",
                event,
                window,
                before,
                self.settings.has_transient_touch_input()
            );

            index = (index + 1) % script.len();
        }
    }
}

#[async_trait::async_trait]
impl InputObserverTrait for DryRunInputObserver {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
