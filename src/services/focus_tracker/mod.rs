//! FocusTracker service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for following the
//! currently focused window and driving the input observer's attachment
//! through the shared FocusContext. It MUST NOT touch any settings
//! property or classify input events.

mod dry_focus_tracker;
mod focus_tracker;
mod kdotool;
mod sway;
mod r#trait;

pub use self::r#trait::{create_focus_tracker, FocusTrackerTrait};
