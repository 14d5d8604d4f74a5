use std::fmt;

/// Change notification emitted by the settings service.
///
/// Each variant carries the new value so subscribers never need to read
/// the service back inside the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    TabletModeAvailableChanged(bool),
    TabletModeChanged(bool),
    MobileChanged(bool),
    TransientTouchInputChanged(bool),
    StyleChanged(String),
}

impl SettingsEvent {
    pub fn property_name(&self) -> &'static str {
        match self {
            SettingsEvent::TabletModeAvailableChanged(_) => "tablet_mode_available",
            SettingsEvent::TabletModeChanged(_) => "tablet_mode",
            SettingsEvent::MobileChanged(_) => "mobile",
            SettingsEvent::TransientTouchInputChanged(_) => "transient_touch_input",
            SettingsEvent::StyleChanged(_) => "style",
        }
    }
}

impl fmt::Display for SettingsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsEvent::TabletModeAvailableChanged(v)
            | SettingsEvent::TabletModeChanged(v)
            | SettingsEvent::MobileChanged(v)
            | SettingsEvent::TransientTouchInputChanged(v) => {
                write!(f, "{} -> {}", self.property_name(), v)
            }
            SettingsEvent::StyleChanged(style) => {
                write!(f, "{} -> \"{}\"", self.property_name(), style)
            }
        }
    }
}
