use crate::config::Config;
use crate::error::Result;
use crate::services::focus_context::FocusContext;
use crate::settings::Settings;
use std::sync::Arc;

/// Trait for input observers that can run in different modes
#[async_trait::async_trait]
pub trait InputObserverTrait {
    /// Run the observer
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate observer based on the dry_run flag
pub fn create_input_observer(
    config: Arc<Config>,
    settings: Arc<Settings>,
    focus: Arc<dyn FocusContext>,
    dry_run: bool,
) -> Result<Box<dyn InputObserverTrait + Send>> {
    if dry_run {
        Ok(Box::new(
            super::dry_input_observer::DryRunInputObserver::new(settings, focus),
        ))
    } else {
        Ok(Box::new(super::input_observer::RealInputObserver::new(
            config, settings, focus,
        )?))
    }
}
