use crate::error::{Result, SettingsError};
use evdev::{AbsoluteAxisCode, Device, KeyCode, PropType, RelativeAxisCode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How a device participates in observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    TouchScreen,
    Pointer,
}

pub struct DeviceFinder;

impl DeviceFinder {
    /// Whether any touch-screen-class device is present. Enumeration
    /// failures (no permission, no /dev/input) mean "no touch screen",
    /// never an error.
    pub fn has_touch_screen(device_path: &str) -> bool {
        match Self::find_observation_devices(device_path) {
            Ok(devices) => devices
                .iter()
                .any(|(_, class)| *class == DeviceClass::TouchScreen),
            Err(e) => {
                debug!("Touch screen enumeration failed: {}", e);
                false
            }
        }
    }

    /// Collect the devices worth observing: touch screens and pointer
    /// devices. An explicit path skips enumeration entirely.
    pub fn find_observation_devices(device_path: &str) -> Result<Vec<(PathBuf, DeviceClass)>> {
        if device_path != "auto" {
            let path = PathBuf::from(device_path);
            if !path.exists() {
                return SettingsError::device_not_found(format!(
                    "configured device not found: {:?}",
                    path
                ));
            }
            return match Self::classify_device(&path) {
                Some(class) => {
                    info!("Using configured device: {:?} ({:?})", path, class);
                    Ok(vec![(path, class)])
                }
                None => SettingsError::device_not_found(format!(
                    "configured device is neither a touch screen nor a pointer: {:?}",
                    path
                )),
            };
        }

        let input_dir = Path::new("/dev/input");

        let entries = fs::read_dir(input_dir).map_err(|e| {
            SettingsError::Permission(format!("no access to /dev/input: {}", e))
        })?;

        let mut event_devices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(SettingsError::Io)?;
            let path = entry.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with("event") {
                event_devices.push(path);
            }
        }
        event_devices.sort();

        let mut devices = Vec::new();
        for path in event_devices {
            if !Self::is_device_accessible(&path) {
                debug!("Device {:?} not accessible, skipping", path);
                continue;
            }
            if let Some(class) = Self::classify_device(&path) {
                debug!("Classified {:?} as {:?}", path, class);
                devices.push((path, class));
            }
        }

        Ok(devices)
    }

    /// Touch screen: direct-input device with multitouch position axes.
    /// Pointer: relative motion plus a left button (mice, trackpoints,
    /// touchpads). Everything else, keyboards included, is skipped.
    fn classify_device(device_path: &Path) -> Option<DeviceClass> {
        let device = match Device::open(device_path) {
            Ok(device) => device,
            Err(e) => {
                debug!("Failed to open device {:?}: {}", device_path, e);
                return None;
            }
        };

        let properties = device.properties();

        let has_mt_axes = device.supported_absolute_axes().map_or(false, |axes| {
            axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_X)
                && axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_Y)
        });

        // DIRECT without POINTER separates touch screens from touchpads.
        if has_mt_axes
            && properties.contains(PropType::DIRECT)
            && !properties.contains(PropType::POINTER)
        {
            return Some(DeviceClass::TouchScreen);
        }

        let has_motion = device
            .supported_relative_axes()
            .map_or(false, |axes| axes.contains(RelativeAxisCode::REL_X));
        let has_button = device
            .supported_keys()
            .map_or(false, |keys| keys.contains(KeyCode::BTN_LEFT));

        if has_motion && has_button {
            return Some(DeviceClass::Pointer);
        }

        None
    }

    fn is_device_accessible(device_path: &Path) -> bool {
        match fs::File::open(device_path) {
            Ok(_) => true,
            Err(e) => {
                debug!("Device {:?} not accessible: {}", device_path, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_device_is_an_error() {
        let result = DeviceFinder::find_observation_devices("/non/existent/event0");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_device_means_no_touch_screen() {
        assert!(!DeviceFinder::has_touch_screen("/non/existent/event0"));
    }
}
