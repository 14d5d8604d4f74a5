use crate::error::{Result, SettingsError};
use crate::events::WindowInfo;
use serde_json::Value;
use std::process::Command;

pub struct SwayBackend;

impl SwayBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("swaymsg").args(["-t", "get_tree"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(SettingsError::ServiceUnavailable(
                "swaymsg failed".to_string(),
            ))
        }
    }

    pub async fn get_active_window(&self) -> Result<WindowInfo> {
        let output = Command::new("swaymsg")
            .args(["-t", "get_tree"])
            .output()
            .map_err(|e| SettingsError::ServiceUnavailable(format!("swaymsg not found: {}", e)))?;

        if !output.status.success() {
            return Err(SettingsError::ServiceUnavailable(
                "swaymsg returned an error".to_string(),
            ));
        }

        let tree: Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            SettingsError::ServiceUnavailable(format!("unparseable sway tree: {}", e))
        })?;

        focused_window(&tree).ok_or_else(|| {
            SettingsError::ServiceUnavailable("no focused window in sway tree".to_string())
        })
    }
}

/// Depth-first search for the container with `"focused": true`. Native
/// wayland clients carry `app_id`; X11 clients carry
/// `window_properties.class` instead.
fn focused_window(node: &Value) -> Option<WindowInfo> {
    if node["focused"].as_bool() == Some(true) {
        let title = node["name"].as_str().unwrap_or_default().to_string();
        let class = node["app_id"]
            .as_str()
            .or_else(|| node["window_properties"]["class"].as_str())
            .unwrap_or_default()
            .to_string();

        let mut window = WindowInfo::new(title).with_class(class);
        if let Some(pid) = node["pid"].as_u64() {
            window = window.with_pid(pid as u32);
        }
        return Some(window);
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(children) = node[key].as_array() {
            for child in children {
                if let Some(window) = focused_window(child) {
                    return Some(window);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focused_wayland_client_has_app_id_class() {
        let tree: Value = serde_json::from_str(
            r#"{
                "focused": false,
                "nodes": [
                    {"focused": false, "nodes": [], "floating_nodes": []},
                    {"focused": false, "nodes": [
                        {"focused": true, "name": "~/src", "app_id": "Alacritty", "pid": 1234}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let window = focused_window(&tree).unwrap();
        assert_eq!(window.title, "~/src");
        assert_eq!(window.class, "Alacritty");
        assert_eq!(window.pid, Some(1234));
    }

    #[test]
    fn test_focused_x11_client_has_window_properties_class() {
        let tree: Value = serde_json::from_str(
            r#"{
                "focused": false,
                "floating_nodes": [
                    {"focused": true, "name": "GIMP", "window_properties": {"class": "Gimp"}}
                ]
            }"#,
        )
        .unwrap();

        let window = focused_window(&tree).unwrap();
        assert_eq!(window.title, "GIMP");
        assert_eq!(window.class, "Gimp");
        assert_eq!(window.pid, None);
    }

    #[test]
    fn test_tree_without_focus_yields_nothing() {
        let tree: Value = serde_json::from_str(r#"{"focused": false, "nodes": []}"#).unwrap();
        assert!(focused_window(&tree).is_none());
    }
}
