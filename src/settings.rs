use crate::config::Config;
use crate::events::{InputEvent, SettingsEvent};
use crate::services::platform::PlatformProbe;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

pub type SettingsCallback = Arc<dyn Fn(&SettingsEvent) + Send + Sync>;

/// Keeps a subscriber registered; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    subscribers: Weak<DashMap<u64, SettingsCallback>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(&self.id);
        }
    }
}

#[derive(Debug, Clone)]
struct State {
    tablet_mode_available: bool,
    tablet_mode: bool,
    mobile: bool,
    /// Raw flag; the effective value is `raw OR tablet_mode`.
    transient_touch_input: bool,
    has_touch_screen: bool,
    has_platform_menu_bar: bool,
    wheel_scroll_lines: i32,
    style: String,
    windowing_system: String,
    window_icon: Option<PathBuf>,
}

/// Initial values for the settings service, normally assembled by
/// [`Settings::initialize`] from the platform probe and the configuration.
#[derive(Debug, Clone)]
pub struct SettingsInit {
    pub tablet_mode_available: bool,
    pub tablet_mode: bool,
    pub mobile: bool,
    pub has_touch_screen: bool,
    pub has_platform_menu_bar: bool,
    pub wheel_scroll_lines: i32,
    pub style: String,
    pub windowing_system: String,
    pub window_icon: Option<PathBuf>,
}

impl Default for SettingsInit {
    fn default() -> Self {
        Self {
            tablet_mode_available: false,
            tablet_mode: false,
            mobile: false,
            has_touch_screen: false,
            has_platform_menu_bar: false,
            wheel_scroll_lines: crate::config::DEFAULT_WHEEL_SCROLL_LINES,
            style: String::new(),
            windowing_system: "unknown".to_string(),
            window_icon: None,
        }
    }
}

/// Process-scoped observable settings.
///
/// Explicitly constructed and passed around as `Arc<Settings>`; there is no
/// hidden global. All mutable properties follow the same rule: update the
/// field and notify subscribers only when the value actually changed, so
/// repeated sets with the same value produce at most one notification.
pub struct Settings {
    state: RwLock<State>,
    subscribers: Arc<DashMap<u64, SettingsCallback>>,
    next_subscriber_id: AtomicU64,
}

impl Settings {
    pub fn new(init: SettingsInit) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(State {
                tablet_mode_available: init.tablet_mode_available,
                tablet_mode: init.tablet_mode,
                mobile: init.mobile,
                transient_touch_input: false,
                has_touch_screen: init.has_touch_screen,
                has_platform_menu_bar: init.has_platform_menu_bar,
                wheel_scroll_lines: init.wheel_scroll_lines.max(1),
                style: init.style,
                windowing_system: init.windowing_system,
                window_icon: init.window_icon,
            }),
            subscribers: Arc::new(DashMap::new()),
            next_subscriber_id: AtomicU64::new(1),
        })
    }

    /// Run the construction-time probe sequence and build the service.
    ///
    /// Order matters: tablet mode first (the watcher service keeps both
    /// flags mirrored afterwards), then the mobile flag, then the touch
    /// screen enumeration, then the one-shot menu bar probe, and finally
    /// the scroll-line count from the configuration. Every probe failure
    /// degrades to a default instead of surfacing an error.
    pub async fn initialize(config: &Config, platform: &dyn PlatformProbe) -> Arc<Self> {
        let tablet_mode_available = platform.tablet_mode_available().await;
        let tablet_mode = platform.tablet_mode().await;

        let mobile = if cfg!(any(target_os = "android", target_os = "ios")) {
            true
        } else {
            mobile_from_env(std::env::var(MOBILE_ENV_VAR).ok().as_deref())
        };

        let has_touch_screen = if cfg!(any(target_os = "android", target_os = "ios")) {
            true
        } else {
            platform.has_touch_screen().await
        };

        let has_platform_menu_bar = platform.has_platform_menu_bar().await;

        let settings = Self::new(SettingsInit {
            tablet_mode_available,
            tablet_mode,
            mobile,
            has_touch_screen,
            has_platform_menu_bar,
            wheel_scroll_lines: config.wheel_scroll_lines(),
            style: config.application.style.clone(),
            windowing_system: platform.windowing_system(),
            window_icon: config.application.icon.clone(),
        });

        info!(
            "Settings initialized: tablet_mode_available={}, tablet_mode={}, mobile={}, \
             touch_screen={}, platform_menu_bar={}, wheel_scroll_lines={}",
            tablet_mode_available,
            tablet_mode,
            mobile,
            has_touch_screen,
            has_platform_menu_bar,
            settings.wheel_scroll_lines(),
        );

        settings
    }

    /// Register a change callback. Delivery stops when the returned
    /// handle is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SettingsEvent) + Send + Sync + 'static,
    {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, Arc::new(callback));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    fn emit(&self, event: SettingsEvent) {
        debug!("settings change: {}", event);
        // Snapshot first so a callback may subscribe or drop its own
        // handle without deadlocking on a map shard.
        let callbacks: Vec<SettingsCallback> =
            self.subscribers.iter().map(|e| e.value().clone()).collect();
        for callback in callbacks {
            callback(&event);
        }
    }

    #[allow(dead_code)]
    pub fn is_tablet_mode_available(&self) -> bool {
        self.state.read().tablet_mode_available
    }

    pub fn set_tablet_mode_available(&self, available: bool) {
        let changed = {
            let mut state = self.state.write();
            if state.tablet_mode_available == available {
                false
            } else {
                state.tablet_mode_available = available;
                true
            }
        };
        if changed {
            self.emit(SettingsEvent::TabletModeAvailableChanged(available));
        }
    }

    #[allow(dead_code)]
    pub fn is_tablet_mode(&self) -> bool {
        self.state.read().tablet_mode
    }

    pub fn set_tablet_mode(&self, tablet_mode: bool) {
        let changed = {
            let mut state = self.state.write();
            if state.tablet_mode == tablet_mode {
                false
            } else {
                state.tablet_mode = tablet_mode;
                true
            }
        };
        if changed {
            self.emit(SettingsEvent::TabletModeChanged(tablet_mode));
        }
    }

    #[allow(dead_code)]
    pub fn is_mobile(&self) -> bool {
        self.state.read().mobile
    }

    #[allow(dead_code)]
    pub fn set_mobile(&self, mobile: bool) {
        let changed = {
            let mut state = self.state.write();
            if state.mobile == mobile {
                false
            } else {
                state.mobile = mobile;
                true
            }
        };
        if changed {
            self.emit(SettingsEvent::MobileChanged(mobile));
        }
    }

    /// Effective transient-touch flag: tablet mode always reports touch
    /// input, whatever the raw flag says.
    pub fn has_transient_touch_input(&self) -> bool {
        let state = self.state.read();
        state.transient_touch_input || state.tablet_mode
    }

    /// While tablet mode holds, the notification is suppressed: the
    /// effective value cannot change, only the raw flag does.
    pub fn set_transient_touch_input(&self, touch: bool) {
        let (changed, suppress) = {
            let mut state = self.state.write();
            if state.transient_touch_input == touch {
                (false, false)
            } else {
                state.transient_touch_input = touch;
                (true, state.tablet_mode)
            }
        };
        if changed && !suppress {
            self.emit(SettingsEvent::TransientTouchInputChanged(touch));
        }
    }

    pub fn has_touch_screen(&self) -> bool {
        self.state.read().has_touch_screen
    }

    #[allow(dead_code)]
    pub fn has_platform_menu_bar(&self) -> bool {
        self.state.read().has_platform_menu_bar
    }

    pub fn wheel_scroll_lines(&self) -> i32 {
        self.state.read().wheel_scroll_lines
    }

    #[allow(dead_code)]
    pub fn style(&self) -> String {
        self.state.read().style.clone()
    }

    #[allow(dead_code)]
    pub fn set_style(&self, style: String) {
        let changed = {
            let mut state = self.state.write();
            if state.style == style {
                false
            } else {
                state.style = style.clone();
                true
            }
        };
        if changed {
            self.emit(SettingsEvent::StyleChanged(style));
        }
    }

    /// Feed one observed input event through the transient-touch rules.
    ///
    /// Returns whether the event was consumed, which is always `false`:
    /// this service only watches, normal dispatch must continue.
    pub fn handle_input_event(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::TouchBegin => self.set_transient_touch_input(true),
            InputEvent::PointerPress { source } | InputEvent::PointerMove { source } => {
                if !source.is_synthesized() {
                    self.set_transient_touch_input(false);
                }
            }
            InputEvent::Wheel => self.set_transient_touch_input(false),
            InputEvent::Other => {}
        }
        false
    }

    /// Informational strings for diagnostics and about dialogs.
    pub fn information(&self) -> Vec<String> {
        vec![
            format!("Windowing system: {}", self.state.read().windowing_system),
            format!("shell-settings {}", env!("CARGO_PKG_VERSION")),
        ]
    }

    /// Window icon of the hosting application, absent when none is set.
    pub fn window_icon(&self) -> Option<PathBuf> {
        self.state.read().window_icon.clone()
    }
}

pub const MOBILE_ENV_VAR: &str = "SHELL_SETTINGS_MOBILE";

/// `"1"` and `"true"` mean mobile; anything else, including unset, does not.
pub fn mobile_from_env(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_subscription(settings: &Settings) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let subscription = settings.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (count, subscription)
    }

    #[test]
    fn test_setters_are_idempotent() {
        let settings = Settings::new(SettingsInit::default());
        let (count, _subscription) = counting_subscription(&settings);

        // Tablet mode stays off here so transient-touch notifications
        // are not suppressed.
        settings.set_transient_touch_input(true);
        settings.set_transient_touch_input(true);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        settings.set_tablet_mode_available(true);
        settings.set_tablet_mode_available(true);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        settings.set_tablet_mode(true);
        settings.set_tablet_mode(true);
        assert_eq!(count.load(Ordering::SeqCst), 3);

        settings.set_mobile(true);
        settings.set_mobile(true);
        assert_eq!(count.load(Ordering::SeqCst), 4);

        settings.set_style("breeze".to_string());
        settings.set_style("breeze".to_string());
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_transient_touch_or_tablet_mode() {
        let settings = Settings::new(SettingsInit::default());
        assert!(!settings.has_transient_touch_input());

        settings.set_tablet_mode(true);
        assert!(settings.has_transient_touch_input());

        settings.set_tablet_mode(false);
        assert!(!settings.has_transient_touch_input());

        settings.set_transient_touch_input(true);
        assert!(settings.has_transient_touch_input());
    }

    #[test]
    fn test_transient_touch_notification_suppressed_in_tablet_mode() {
        let settings = Settings::new(SettingsInit::default());
        settings.set_tablet_mode(true);

        let events = Arc::new(RwLock::new(Vec::new()));
        let sink = events.clone();
        let _subscription = settings.subscribe(move |event| {
            sink.write().push(event.clone());
        });

        // Effective value is already true, the raw flip must stay silent.
        settings.set_transient_touch_input(true);
        assert!(events.read().is_empty());

        settings.set_tablet_mode(false);
        assert_eq!(
            *events.read(),
            vec![SettingsEvent::TabletModeChanged(false)]
        );
        // The raw flag was set while suppressed, so touch is still reported.
        assert!(settings.has_transient_touch_input());
    }

    #[test]
    fn test_input_event_sequences() {
        let settings = Settings::new(SettingsInit::default());

        assert!(!settings.handle_input_event(&InputEvent::TouchBegin));
        assert!(settings.has_transient_touch_input());

        // Synthesized pointer events leave the flag alone.
        settings.handle_input_event(&InputEvent::synthesized_press());
        assert!(settings.has_transient_touch_input());
        settings.handle_input_event(&InputEvent::PointerMove {
            source: crate::events::PointerSource::SynthesizedFromTouch,
        });
        assert!(settings.has_transient_touch_input());

        // A physical press clears it.
        settings.handle_input_event(&InputEvent::physical_press());
        assert!(!settings.has_transient_touch_input());

        // Wheel clears unconditionally, even right after a synthesized event.
        settings.handle_input_event(&InputEvent::TouchBegin);
        settings.handle_input_event(&InputEvent::synthesized_press());
        settings.handle_input_event(&InputEvent::Wheel);
        assert!(!settings.has_transient_touch_input());

        // Unclassified events are ignored.
        settings.handle_input_event(&InputEvent::TouchBegin);
        settings.handle_input_event(&InputEvent::Other);
        assert!(settings.has_transient_touch_input());
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let settings = Settings::new(SettingsInit::default());
        let (count, subscription) = counting_subscription(&settings);

        settings.set_mobile(true);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        drop(subscription);
        settings.set_mobile(false);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wheel_scroll_lines_clamped() {
        let settings = Settings::new(SettingsInit {
            wheel_scroll_lines: 0,
            ..SettingsInit::default()
        });
        assert_eq!(settings.wheel_scroll_lines(), 1);

        let settings = Settings::new(SettingsInit {
            wheel_scroll_lines: -2,
            ..SettingsInit::default()
        });
        assert_eq!(settings.wheel_scroll_lines(), 1);

        let settings = Settings::new(SettingsInit::default());
        assert_eq!(settings.wheel_scroll_lines(), 3);
    }

    #[test]
    fn test_mobile_from_env() {
        assert!(mobile_from_env(Some("1")));
        assert!(mobile_from_env(Some("true")));
        assert!(!mobile_from_env(Some("0")));
        assert!(!mobile_from_env(Some("false")));
        assert!(!mobile_from_env(Some("")));
        assert!(!mobile_from_env(Some("TRUE")));
        assert!(!mobile_from_env(None));
    }

    #[test]
    fn test_information_and_icon() {
        let settings = Settings::new(SettingsInit {
            windowing_system: "wayland".to_string(),
            window_icon: Some(PathBuf::from("/usr/share/icons/app.png")),
            ..SettingsInit::default()
        });

        let info = settings.information();
        assert_eq!(info.len(), 2);
        assert!(info[0].contains("wayland"));
        assert_eq!(
            settings.window_icon(),
            Some(PathBuf::from("/usr/share/icons/app.png"))
        );

        let settings = Settings::new(SettingsInit::default());
        assert!(settings.window_icon().is_none());
    }

    #[test]
    fn test_immutable_probes_stay_put() {
        let settings = Settings::new(SettingsInit {
            has_touch_screen: true,
            has_platform_menu_bar: true,
            ..SettingsInit::default()
        });
        assert!(settings.has_touch_screen());
        assert!(settings.has_platform_menu_bar());
    }
}
