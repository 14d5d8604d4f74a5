use super::kdotool::KdotoolBackend;
use super::r#trait::FocusTrackerTrait;
use super::sway::SwayBackend;
use crate::config::Config;
use crate::error::{Result, SettingsError};
use crate::events::{WindowEvent, WindowInfo};
use crate::services::focus_context::FocusContext;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
enum DesktopEnvironment {
    Kde,
    Sway,
    WaylandGeneric,
    X11Generic,
    Unknown,
}

#[derive(Debug, Clone)]
enum WorkingMethod {
    Kdotool,
    Sway,
}

/// Polls for the active window and re-attaches the observer subscription
/// through the FocusContext whenever focus moves.
pub struct RealFocusTracker {
    config: Arc<Config>,
    focus: Arc<dyn FocusContext>,
    desktop_env: DesktopEnvironment,
    current_window: RwLock<Option<WindowInfo>>,

    kdotool: KdotoolBackend,
    sway: SwayBackend,
}

impl RealFocusTracker {
    pub fn new(config: Arc<Config>, focus: Arc<dyn FocusContext>) -> Self {
        info!("Initializing RealFocusTracker");

        let desktop_env = Self::detect_desktop_environment();
        info!("Detected desktop environment: {:?}", desktop_env);

        Self {
            config,
            focus,
            desktop_env,
            current_window: RwLock::new(None),
            kdotool: KdotoolBackend::new(),
            sway: SwayBackend::new(),
        }
    }

    fn detect_desktop_environment() -> DesktopEnvironment {
        if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
            let desktop = desktop.to_lowercase();
            if desktop.contains("kde") {
                return DesktopEnvironment::Kde;
            }
            if desktop.contains("sway") {
                return DesktopEnvironment::Sway;
            }
        }

        if std::env::var("SWAYSOCK").is_ok() {
            return DesktopEnvironment::Sway;
        }

        if let Ok(session) = std::env::var("XDG_SESSION_TYPE") {
            match session.as_str() {
                "wayland" => return DesktopEnvironment::WaylandGeneric,
                "x11" => return DesktopEnvironment::X11Generic,
                _ => {}
            }
        }

        DesktopEnvironment::Unknown
    }

    async fn detect_working_method(&self) -> Result<WorkingMethod> {
        info!("Probing focus-tracking backends...");

        if matches!(
            self.desktop_env,
            DesktopEnvironment::Kde | DesktopEnvironment::X11Generic | DesktopEnvironment::Unknown
        ) && self.kdotool.test().await.is_ok()
        {
            info!("Using kdotool");
            return Ok(WorkingMethod::Kdotool);
        }

        if self.sway.test().await.is_ok() {
            info!("Using sway IPC");
            return Ok(WorkingMethod::Sway);
        }

        // Fall back to whichever answers, regardless of the detected DE.
        if self.kdotool.test().await.is_ok() {
            info!("Using kdotool (fallback)");
            return Ok(WorkingMethod::Kdotool);
        }

        Err(SettingsError::ServiceUnavailable(
            "no focus-tracking backend works".to_string(),
        ))
    }

    async fn run_impl(self) -> Result<()> {
        info!("RealFocusTracker running for: {:?}", self.desktop_env);

        let mut working_method = match self.detect_working_method().await {
            Ok(method) => method,
            Err(e) => {
                warn!(
                    "Focus tracking unavailable, observer stays detached: {}",
                    e
                );
                return Ok(());
            }
        };

        let mut interval = interval(Duration::from_millis(self.config.watcher.poll_interval_ms));

        loop {
            interval.tick().await;

            match self.get_window_by_method(&working_method).await {
                Ok(window) => {
                    if self.is_window_changed(&window) {
                        debug!("Focus moved to: {}", window);
                        self.apply_focus_change(window);
                    }
                }
                Err(e) => {
                    warn!(
                        "Backend {:?} stopped working: {}. Re-probing...",
                        working_method, e
                    );
                    self.apply_focus_lost();
                    match self.detect_working_method().await {
                        Ok(new_method) => {
                            info!("Switched to backend: {:?}", new_method);
                            working_method = new_method;
                        }
                        Err(_) => {
                            error!("No backend works, pausing focus tracking for 10 seconds");
                            tokio::time::sleep(Duration::from_secs(10)).await;
                        }
                    }
                }
            }
        }
    }

    async fn get_window_by_method(&self, method: &WorkingMethod) -> Result<WindowInfo> {
        match method {
            WorkingMethod::Kdotool => self.kdotool.get_active_window().await,
            WorkingMethod::Sway => self.sway.get_active_window().await,
        }
    }

    fn is_window_changed(&self, new_window: &WindowInfo) -> bool {
        let current_window = self.current_window.read();
        match current_window.as_ref() {
            Some(current) => current.title != new_window.title || current.class != new_window.class,
            None => true,
        }
    }

    fn apply_focus_change(&self, window: WindowInfo) {
        self.focus
            .handle_window_event(&WindowEvent::focus_changed(window.clone()));
        *self.current_window.write() = Some(window);
    }

    fn apply_focus_lost(&self) {
        self.focus.handle_window_event(&WindowEvent::focus_lost());
        *self.current_window.write() = None;
    }
}

impl Drop for RealFocusTracker {
    fn drop(&mut self) {
        info!("RealFocusTracker shutting down");
    }
}

#[async_trait::async_trait]
impl FocusTrackerTrait for RealFocusTracker {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
