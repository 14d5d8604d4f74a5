//! PlatformProbe: single capability-query abstraction
//!
//! Everything the settings service wants to know about the host platform
//! (tablet mode, native menu bar, touch devices, windowing system) goes
//! through this one trait. Implementations must degrade to defaults when
//! a query fails; callers never see probe errors.

mod linux;
mod static_probe;

pub use linux::LinuxPlatform;
pub use static_probe::StaticPlatform;

use crate::config::Config;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait PlatformProbe: Send + Sync {
    /// Whether the platform can switch into tablet mode at all.
    async fn tablet_mode_available(&self) -> bool;

    /// Whether the platform is currently in tablet mode.
    async fn tablet_mode(&self) -> bool;

    /// Whether a native (global) menu bar can be created. One-shot probe.
    async fn has_platform_menu_bar(&self) -> bool;

    /// Whether any touch-screen-class input device is present.
    async fn has_touch_screen(&self) -> bool;

    /// Host windowing system name, for diagnostics.
    fn windowing_system(&self) -> String;
}

/// Factory: a static probe in dry-run mode, the real D-Bus/evdev probe
/// otherwise.
pub async fn create_platform_probe(config: Arc<Config>, dry_run: bool) -> Arc<dyn PlatformProbe> {
    if dry_run {
        Arc::new(StaticPlatform::default())
    } else {
        Arc::new(LinuxPlatform::connect(config).await)
    }
}
