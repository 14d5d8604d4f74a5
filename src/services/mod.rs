pub mod focus_context;
pub mod focus_tracker;
pub mod input_observer;
pub mod platform;
pub mod tablet_watcher;

pub use focus_context::{FocusContext, SharedFocusContext};
pub use focus_tracker::create_focus_tracker;
pub use input_observer::create_input_observer;
pub use platform::create_platform_probe;
pub use tablet_watcher::create_tablet_watcher;
