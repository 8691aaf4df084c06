//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use guess_core::DEFAULT_ZONES;

/// Default per-lookup DNS timeout in seconds.
pub const DEFAULT_DNS_TIMEOUT: u64 = 2;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# guess configuration
# See: guess --help for all options

# Time zones shown in conversion tables, in order (IANA names)
timezones = [
    "America/Los_Angeles",
    "America/New_York",
    "UTC",
    "Europe/Berlin",
    "Asia/Dubai",
    "Asia/Singapore",
    "Australia/Sydney",
]

# Zone used for naive dates and timestamp renderings (default: detected)
# local_zone = "Europe/Berlin"

# Show guesses with negative goodness
unlikely = false

# Sort guesses by goodness (false keeps discovery order)
sort = true

# Disable colored output
no_color = false

# Reverse/forward DNS lookup timeout in seconds
dns_timeout = 2
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timezones: Option<Vec<String>>,
    pub local_zone: Option<String>,
    pub unlikely: Option<bool>,
    pub sort: Option<bool>,
    pub no_color: Option<bool>,
    pub dns_timeout: Option<u64>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/guess/config.toml`
    /// - macOS: `~/Library/Application Support/guess/config.toml`
    /// - Windows: `%APPDATA%\guess\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("guess").join("config.toml"))
    }

    /// Load config from file. Returns default if the file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Comma-separated zone list with precedence: env > config > default.
    pub fn timezones(&self) -> String {
        std::env::var("GUESS_TIMEZONES")
            .ok()
            .or_else(|| self.timezones.as_ref().map(|zones| zones.join(",")))
            .unwrap_or_else(|| DEFAULT_ZONES.to_string())
    }

    /// Local zone override with precedence: env > config. `None` means detect.
    pub fn local_zone(&self) -> Option<String> {
        std::env::var("GUESS_LOCAL_ZONE")
            .ok()
            .or_else(|| self.local_zone.clone())
    }

    /// Get unlikely with precedence: env > config > default.
    pub fn unlikely(&self) -> bool {
        Self::env_var("GUESS_UNLIKELY")
            .or(self.unlikely)
            .unwrap_or(false)
    }

    /// Get sort from config, defaulting to on.
    pub fn sort(&self) -> bool {
        self.sort.unwrap_or(true)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("GUESS_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Get dns_timeout (seconds) with precedence: env > config > default.
    pub fn dns_timeout(&self) -> u64 {
        Self::env_var("GUESS_DNS_TIMEOUT")
            .or(self.dns_timeout)
            .unwrap_or(DEFAULT_DNS_TIMEOUT)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}
