pub mod input;
pub mod settings;
pub mod window;

pub use input::{InputEvent, PointerSource};
pub use settings::SettingsEvent;
pub use window::{WindowEvent, WindowEventType, WindowInfo};
