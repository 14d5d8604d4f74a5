use crate::events::{WindowEvent, WindowEventType, WindowInfo};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// FocusContext is the attachment state shared between the focus tracker
/// and the input observer.
///
/// Responsibilities (strict):
/// - Record whether some window currently holds focus, with a cheap read
///   on the observer's hot path.
/// - Do NOT classify input events or touch settings state; the observer
///   and the settings service own that.
pub trait FocusContext: Send + Sync {
    /// Apply a focus transition from the tracker.
    fn handle_window_event(&self, event: &WindowEvent);
    /// Whether the observer subscription is currently attached.
    fn is_attached(&self) -> bool;
    /// The window the subscription is attached to, if any.
    fn focused_window(&self) -> Option<WindowInfo>;
}

/// Default implementation backed by an atomic attached flag so the
/// observer's per-event check stays lock-free.
pub struct SharedFocusContext {
    attached: AtomicBool,
    window: RwLock<Option<WindowInfo>>,
}

impl Default for SharedFocusContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFocusContext {
    pub fn new() -> Self {
        Self {
            attached: AtomicBool::new(false),
            window: RwLock::new(None),
        }
    }
}

impl FocusContext for SharedFocusContext {
    fn handle_window_event(&self, event: &WindowEvent) {
        match event.event_type {
            WindowEventType::FocusChanged => {
                *self.window.write() = event.window.clone();
                self.attached.store(event.window.is_some(), Ordering::Release);
            }
            WindowEventType::FocusLost => {
                *self.window.write() = None;
                self.attached.store(false, Ordering::Release);
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    fn focused_window(&self) -> Option<WindowInfo> {
        self.window.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_detach_cycle() {
        let ctx = SharedFocusContext::new();
        assert!(!ctx.is_attached());
        assert!(ctx.focused_window().is_none());

        ctx.handle_window_event(&WindowEvent::focus_changed(WindowInfo::new(
            "Terminal".to_string(),
        )));
        assert!(ctx.is_attached());
        assert_eq!(ctx.focused_window().unwrap().title, "Terminal");

        ctx.handle_window_event(&WindowEvent::focus_lost());
        assert!(!ctx.is_attached());
        assert!(ctx.focused_window().is_none());
    }

    #[test]
    fn test_reattach_on_focus_move() {
        let ctx = SharedFocusContext::new();
        ctx.handle_window_event(&WindowEvent::focus_changed(WindowInfo::new(
            "Editor".to_string(),
        )));
        ctx.handle_window_event(&WindowEvent::focus_changed(WindowInfo::new(
            "Browser".to_string(),
        )));
        assert!(ctx.is_attached());
        assert_eq!(ctx.focused_window().unwrap().title, "Browser");
    }
}
