use crate::error::{Result, SettingsError};
use crate::events::WindowInfo;
use std::process::Command;
use tracing::debug;

pub struct KdotoolBackend;

impl KdotoolBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("kdotool")
            .arg("getactivewindow")
            .output()
            .map_err(|e| SettingsError::ServiceUnavailable(format!("kdotool not found: {}", e)))?;

        if output.status.success() && !output.stdout.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::ServiceUnavailable(
                "kdotool getactivewindow failed".to_string(),
            ))
        }
    }

    pub async fn get_active_window(&self) -> Result<WindowInfo> {
        let output = Command::new("kdotool")
            .arg("getactivewindow")
            .output()
            .map_err(|e| SettingsError::ServiceUnavailable(format!("kdotool not found: {}", e)))?;

        if !output.status.success() {
            return Err(SettingsError::ServiceUnavailable(
                "kdotool returned an error".to_string(),
            ));
        }

        let window_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if window_id.is_empty() {
            return Err(SettingsError::ServiceUnavailable(
                "no active window".to_string(),
            ));
        }

        let name_output = Command::new("kdotool")
            .args(["getwindowname", &window_id])
            .output()
            .map_err(|e| SettingsError::ServiceUnavailable(format!("kdotool failed: {}", e)))?;

        if !name_output.status.success() {
            debug!("kdotool getwindowname failed for {}", window_id);
            return Ok(WindowInfo::new("Unknown".to_string()));
        }

        let title = String::from_utf8_lossy(&name_output.stdout)
            .trim()
            .to_string();

        let mut window = WindowInfo::new(title);

        let class_output = Command::new("kdotool")
            .args(["getwindowclassname", &window_id])
            .output();
        if let Ok(class_output) = class_output {
            if class_output.status.success() {
                let class = String::from_utf8_lossy(&class_output.stdout)
                    .trim()
                    .to_string();
                window = window.with_class(class);
            }
        }

        Ok(window)
    }
}
