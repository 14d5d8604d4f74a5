use serde::{Deserialize, Serialize};
use std::fmt;

/// Information about a toplevel window, as much as the backend can tell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowInfo {
    pub title: String,
    pub class: String,
    pub pid: Option<u32>,
}

impl WindowInfo {
    pub fn new(title: String) -> Self {
        Self {
            title,
            class: String::new(),
            pid: None,
        }
    }

    pub fn with_class(mut self, class: String) -> Self {
        self.class = class;
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "\"{}\"", self.title)
        } else {
            write!(f, "\"{}\" ({})", self.title, self.class)
        }
    }
}

/// Focus transition reported by the focus tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowEventType {
    FocusChanged,
    FocusLost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEvent {
    pub window: Option<WindowInfo>,
    pub event_type: WindowEventType,
    pub timestamp: std::time::Instant,
}

impl WindowEvent {
    pub fn focus_changed(window: WindowInfo) -> Self {
        Self {
            window: Some(window),
            event_type: WindowEventType::FocusChanged,
            timestamp: std::time::Instant::now(),
        }
    }

    pub fn focus_lost() -> Self {
        Self {
            window: None,
            event_type: WindowEventType::FocusLost,
            timestamp: std::time::Instant::now(),
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.window {
            Some(window) => write!(f, "{:?}: {}", self.event_type, window),
            None => write!(f, "{:?}", self.event_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_info_creation() {
        let window = WindowInfo::new("Files".to_string())
            .with_class("org.gnome.Nautilus".to_string())
            .with_pid(4321);

        assert_eq!(window.title, "Files");
        assert_eq!(window.class, "org.gnome.Nautilus");
        assert_eq!(window.pid, Some(4321));
    }

    #[test]
    fn test_focus_events() {
        let event = WindowEvent::focus_changed(WindowInfo::new("Terminal".to_string()));
        assert_eq!(event.event_type, WindowEventType::FocusChanged);
        assert!(event.window.is_some());

        let event = WindowEvent::focus_lost();
        assert_eq!(event.event_type, WindowEventType::FocusLost);
        assert!(event.window.is_none());
    }
}
