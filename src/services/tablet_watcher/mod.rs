//! TabletWatcher service: responsibility and boundaries
//!
//! Keeps the settings service's tablet_mode_available and tablet_mode
//! flags mirrored against the platform for the process lifetime. It MUST
//! NOT mutate any other settings property; deduplication of unchanged
//! values is the settings setters' job, not this service's.

mod dry_tablet_watcher;
mod tablet_watcher;
mod r#trait;

pub use self::r#trait::{create_tablet_watcher, TabletWatcherTrait};
