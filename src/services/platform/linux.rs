use super::PlatformProbe;
use crate::config::Config;
use crate::error::{Result, SettingsError};
use crate::utils::DeviceFinder;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zbus::names::BusName;
use zbus::Connection;

const TABLET_MODE_SERVICE: &str = "org.kde.KWin";
const TABLET_MODE_PATH: &str = "/org/kde/KWin";
const TABLET_MODE_INTERFACE: &str = "org.kde.KWin.TabletModeManager";

/// Bus name owned by a global-menu registrar when one is running; its
/// presence is the Linux equivalent of "a native menu bar can be created".
const MENU_REGISTRAR_NAME: &str = "com.canonical.AppMenu.Registrar";

/// Real platform probe: tablet mode and menu bar over the session bus,
/// touch devices over /dev/input.
pub struct LinuxPlatform {
    config: Arc<Config>,
    connection: Option<Connection>,
}

impl LinuxPlatform {
    pub async fn connect(config: Arc<Config>) -> Self {
        let connection = match Connection::session().await {
            Ok(connection) => Some(connection),
            Err(e) => {
                warn!("Session bus unavailable, D-Bus probes default to false: {}", e);
                None
            }
        };

        if connection.is_some() {
            info!("Connected to the session bus");
        }

        Self { config, connection }
    }

    async fn tablet_property(&self, name: &str) -> Result<bool> {
        let connection = self.connection.as_ref().ok_or_else(|| {
            SettingsError::ServiceUnavailable("no session bus connection".to_string())
        })?;

        let proxy = zbus::Proxy::new(
            connection,
            TABLET_MODE_SERVICE,
            TABLET_MODE_PATH,
            TABLET_MODE_INTERFACE,
        )
        .await?;

        Ok(proxy.get_property::<bool>(name).await?)
    }

    /// Failed probes fall back to false, matching a desktop without the
    /// capability.
    async fn tablet_property_or_false(&self, name: &str) -> bool {
        match self.tablet_property(name).await {
            Ok(value) => value,
            Err(e) => {
                debug!("Tablet-mode property {} not readable: {}", name, e);
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl PlatformProbe for LinuxPlatform {
    async fn tablet_mode_available(&self) -> bool {
        self.tablet_property_or_false("tabletModeAvailable").await
    }

    async fn tablet_mode(&self) -> bool {
        self.tablet_property_or_false("tabletMode").await
    }

    async fn has_platform_menu_bar(&self) -> bool {
        let Some(connection) = self.connection.as_ref() else {
            return false;
        };

        let Ok(proxy) = zbus::fdo::DBusProxy::new(connection).await else {
            return false;
        };

        let Ok(name) = BusName::try_from(MENU_REGISTRAR_NAME) else {
            return false;
        };

        match proxy.name_has_owner(name).await {
            Ok(owned) => {
                debug!("Menu registrar present: {}", owned);
                owned
            }
            Err(e) => {
                debug!("Menu registrar query failed: {}", e);
                false
            }
        }
    }

    async fn has_touch_screen(&self) -> bool {
        DeviceFinder::has_touch_screen(&self.config.input.device_path)
    }

    fn windowing_system(&self) -> String {
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            return "wayland".to_string();
        }
        if std::env::var("DISPLAY").is_ok() {
            return "x11".to_string();
        }
        std::env::var("XDG_SESSION_TYPE").unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probes_default_to_false_without_bus() {
        let platform = LinuxPlatform {
            config: Arc::new(Config::default()),
            connection: None,
        };

        assert!(matches!(
            platform.tablet_property("tabletMode").await,
            Err(SettingsError::ServiceUnavailable(_))
        ));
        assert!(!platform.tablet_mode_available().await);
        assert!(!platform.tablet_mode().await);
        assert!(!platform.has_platform_menu_bar().await);
    }
}
