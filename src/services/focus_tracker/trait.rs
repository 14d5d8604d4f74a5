use crate::config::Config;
use crate::error::Result;
use crate::services::focus_context::FocusContext;
use std::sync::Arc;

/// Trait for focus trackers that can run in different modes
#[async_trait::async_trait]
pub trait FocusTrackerTrait {
    /// Run the focus tracker
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate tracker based on the dry_run flag
pub fn create_focus_tracker(
    config: Arc<Config>,
    focus: Arc<dyn FocusContext>,
    dry_run: bool,
) -> Result<Box<dyn FocusTrackerTrait + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_focus_tracker::DryRunFocusTracker::new(
            focus,
        )))
    } else {
        Ok(Box::new(super::focus_tracker::RealFocusTracker::new(
            config, focus,
        )))
    }
}
