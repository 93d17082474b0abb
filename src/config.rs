/// Extension configuration: service endpoints and UI timings

/// Production API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://curaq.app/api/v1";

/// Public site, also the host of the share page
pub const DEFAULT_SITE_URL: &str = "https://curaq.app";

/// Context menu entry registered by the background worker
pub const CONTEXT_MENU_ID: &str = "save-to-curaq";
pub const CONTEXT_MENU_TITLE: &str = "Save to CuraQ";

/// Extension page opened by the context menu when a token is stored
pub const CONFIRM_PAGE: &str = "confirm.html";

/// Delay before the popup closes itself after a successful send
pub const SUCCESS_CLOSE_DELAY_MS: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize {
            width: 500,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub site_url: String,
    pub confirm_window: WindowSize,
    pub success_close_delay_ms: u32,
}

impl Settings {
    /// Defaults, with the URLs overridable at build time for local development:
    ///
    /// ```text
    /// CURAQ_API_URL=http://localhost:5173/api/v1 CURAQ_SITE_URL=http://localhost:5173 wasm-pack build
    /// ```
    pub fn load() -> Self {
        Self::with_overrides(option_env!("CURAQ_API_URL"), option_env!("CURAQ_SITE_URL"))
    }

    fn with_overrides(api_base_url: Option<&str>, site_url: Option<&str>) -> Self {
        let mut settings = Settings::default();

        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            settings.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = site_url.map(str::trim).filter(|u| !u.is_empty()) {
            settings.site_url = url.trim_end_matches('/').to_string();
        }

        settings
    }

    pub fn share_page_url(&self) -> String {
        format!("{}/share", self.site_url)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            confirm_window: WindowSize::default(),
            success_close_delay_ms: SUCCESS_CLOSE_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_production() {
        let settings = Settings::default();

        assert_eq!(settings.api_base_url, "https://curaq.app/api/v1");
        assert_eq!(settings.share_page_url(), "https://curaq.app/share");
        assert_eq!(settings.confirm_window, WindowSize { width: 500, height: 600 });
        assert_eq!(settings.success_close_delay_ms, 1500);
    }

    #[test]
    fn test_overrides_strip_trailing_slash() {
        let settings = Settings::with_overrides(
            Some("http://localhost:5173/api/v1/"),
            Some("http://localhost:5173/"),
        );

        assert_eq!(settings.api_base_url, "http://localhost:5173/api/v1");
        assert_eq!(settings.share_page_url(), "http://localhost:5173/share");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let settings = Settings::with_overrides(Some("  "), None);
        assert_eq!(settings, Settings::default());
    }
}
