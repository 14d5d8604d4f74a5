//! InputObserver service: responsibility and boundaries
//!
//! Watches input devices passively and feeds classified events to
//! Settings::handle_input_event while a focused window is attached. It
//! MUST NOT grab devices or consume events, and it MUST NOT decide what
//! the transient-touch flag becomes; that rule lives in the settings
//! service.

mod classify;
mod dry_input_observer;
mod input_observer;
mod r#trait;

pub use self::classify::classify_event;
pub use self::r#trait::{create_input_observer, InputObserverTrait};
