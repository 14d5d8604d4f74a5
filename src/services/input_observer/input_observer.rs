use super::classify::classify_event;
use super::r#trait::InputObserverTrait;
use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::{Result, SettingsError};
use crate::events::InputEvent;
use crate::services::focus_context::FocusContext;
use crate::settings::Settings;
use crate::utils::device_finder::DeviceClass;
use crate::utils::DeviceFinder;
use evdev::Device;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct RealInputObserver {
    settings: Arc<Settings>,
    focus: Arc<dyn FocusContext>,
    devices: Vec<(PathBuf, DeviceClass)>,
}

impl RealInputObserver {
    pub fn new(
        config: Arc<Config>,
        settings: Arc<Settings>,
        focus: Arc<dyn FocusContext>,
    ) -> Result<Self> {
        info!("Initializing RealInputObserver");

        let devices = DeviceFinder::find_observation_devices(&config.input.device_path)?;
        for (path, class) in &devices {
            info!("Observing {:?} as {:?}", path, class);
        }

        Ok(Self {
            settings,
            focus,
            devices,
        })
    }

    async fn run_impl(self) -> Result<()> {
        if self.devices.is_empty() {
            info!("No observable input devices, observer is a no-op");
            return Ok(());
        }

        info!(
            "RealInputObserver running on {} device(s)",
            self.devices.len()
        );

        let mut handles = Vec::new();
        for (path, class) in self.devices {
            let settings = self.settings.clone();
            let focus = self.focus.clone();

            // Device reads block; one blocking task per device keeps a
            // silent touch screen from starving the mouse.
            handles.push(tokio::task::spawn_blocking(move || {
                observe_device(path, class, settings, focus)
            }));
        }

        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Device observation stopped: {}", e),
                Err(e) => warn!("Observation task failed: {}", e),
            }
        }

        Ok(())
    }
}

fn observe_device(
    path: PathBuf,
    class: DeviceClass,
    settings: Arc<Settings>,
    focus: Arc<dyn FocusContext>,
) -> Result<()> {
    let mut device = Device::open(&path).map_err(|e| {
        SettingsError::DeviceNotFound(format!("failed to open device {:?}: {}", path, e))
    })?;

    info!(
        "Observing device: {} ({:?})",
        device.name().unwrap_or("Unknown"),
        class
    );

    // Deliberately no grab: this observer never consumes events, normal
    // dispatch must keep seeing everything.
    loop {
        let events = match device.fetch_events() {
            Ok(events) => events.collect::<Vec<_>>(),
            Err(e) => {
                error!("Failed to read events from {:?}: {}", path, e);
                std::thread::sleep(std::time::Duration::from_millis(100));
                continue;
            }
        };

        for event in events {
            let classified = classify_event(event.event_type(), event.code(), event.value(), class);
            if classified == InputEvent::Other {
                continue;
            }

            // Detached means no focused window: nothing to adapt, skip.
            if !focus.is_attached() {
                continue;
            }

            debug_if_enabled!("Observed input event: {}", classified);
            settings.handle_input_event(&classified);
        }
    }
}

#[async_trait::async_trait]
impl InputObserverTrait for RealInputObserver {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
