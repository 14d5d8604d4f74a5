use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Insufficient permissions: {0}")]
    Permission(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl SettingsError {
    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(SettingsError::DeviceNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
