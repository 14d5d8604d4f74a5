use super::PlatformProbe;

/// Fixed-answer probe for dry-run mode and tests.
#[derive(Debug, Clone)]
pub struct StaticPlatform {
    pub tablet_mode_available: bool,
    pub tablet_mode: bool,
    pub has_platform_menu_bar: bool,
    pub has_touch_screen: bool,
    pub windowing_system: String,
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self {
            tablet_mode_available: false,
            tablet_mode: false,
            has_platform_menu_bar: false,
            has_touch_screen: true,
            windowing_system: "dry-run".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PlatformProbe for StaticPlatform {
    async fn tablet_mode_available(&self) -> bool {
        self.tablet_mode_available
    }

    async fn tablet_mode(&self) -> bool {
        self.tablet_mode
    }

    async fn has_platform_menu_bar(&self) -> bool {
        self.has_platform_menu_bar
    }

    async fn has_touch_screen(&self) -> bool {
        self.has_touch_screen
    }

    fn windowing_system(&self) -> String {
        self.windowing_system.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_probe_answers() {
        let probe = StaticPlatform {
            tablet_mode_available: true,
            tablet_mode: true,
            has_platform_menu_bar: true,
            has_touch_screen: false,
            windowing_system: "test".to_string(),
        };

        assert!(probe.tablet_mode_available().await);
        assert!(probe.tablet_mode().await);
        assert!(probe.has_platform_menu_bar().await);
        assert!(!probe.has_touch_screen().await);
        assert_eq!(probe.windowing_system(), "test");
    }
}
