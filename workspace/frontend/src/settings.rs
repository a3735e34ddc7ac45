use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "paydash_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 8080)
    pub api_port: u16,

    /// API path prefix (e.g., "/api")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Rows per page in the transaction table
    pub page_size: u32,

    /// How long a search target stays highlighted, in milliseconds
    pub highlight_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 8080,
            api_path: "/api".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            page_size: state::pagination::DEFAULT_PAGE_SIZE,
            highlight_ms: 2000,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            // Custom settings from localStorage
            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_overrides(|key| {
                    storage
                        .get_item(&format!("{}{}", STORAGE_PREFIX, key))
                        .ok()
                        .flatten()
                });
            }
        }

        settings
    }

    /// Overrides fields from a key lookup (`api_host`, `page_size`, ...).
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_host) = lookup("api_host") {
            self.api_host = api_host;
        }
        if let Some(port) = lookup("api_port").and_then(|v| v.parse::<u16>().ok()) {
            self.api_port = port;
        }
        if let Some(api_path) = lookup("api_path") {
            self.api_path = api_path;
        }
        if let Some(use_https) = lookup("api_use_https") {
            self.api_use_https = use_https.to_lowercase() == "true";
        }
        if let Some(log_level) = lookup("log_level") {
            self.log_level = match log_level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }
        if let Some(size) = lookup("page_size").and_then(|v| v.parse::<u32>().ok()) {
            self.page_size = size.max(1);
        }
        if let Some(ms) = lookup("highlight_ms").and_then(|v| v.parse::<u32>().ok()) {
            self.highlight_ms = ms;
        }
    }

    /// Get the base API URL (protocol + host + port + path)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
