pub mod device_finder;
pub mod permissions;

pub use device_finder::DeviceFinder;

// Conditional debug logging for the per-event hot path
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}
