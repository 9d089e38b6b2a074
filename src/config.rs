//! JSON configuration for embedding the scanner.
//!
//! ```json
//! {
//!   "url_prefix": "happy:///account?",
//!   "locale": "es",
//!   "theme": { "preset": "dark", "overrides": { "text_link": "#2baccc" } },
//!   "host": { "device_class": "tablet", "platform": "web" }
//! }
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    l10n::{self, LanguageIdentifier},
    layout::{DeviceClass, HostEnvironment, Platform},
    scanner::TERMINAL_PREFIX,
    theme::{ThemeOverrides, ThemePreset, ThemeTokens},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    pub url_prefix: Option<String>,
    pub locale: Option<String>,
    #[serde(default)]
    pub theme: ThemeConfig,
    pub host: Option<HostConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub preset: ThemePreset,
    #[serde(default)]
    pub overrides: ThemeOverrides,
}

/// Replaces host detection, e.g. to lay out a phone UI on a desktop.
/// Fields left out keep their detected value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    pub device_class: Option<DeviceClass>,
    pub platform: Option<Platform>,
    pub desktop_host: Option<bool>,
}

impl HostConfig {
    pub fn apply(&self, mut env: HostEnvironment) -> HostEnvironment {
        if let Some(device_class) = self.device_class {
            env.device_class = Some(device_class);
        }
        if let Some(platform) = self.platform {
            env.platform = platform;
        }
        if let Some(desktop_host) = self.desktop_host {
            env.desktop_host = desktop_host;
        }
        env
    }
}

/// A config with every default filled in and every string parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub url_prefix: String,
    pub locale: LanguageIdentifier,
    pub theme: ThemeTokens,
    pub host: HostEnvironment,
}

impl ScannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Resolves against `detected`, the host as seen at runtime.
    pub fn resolve(&self, detected: HostEnvironment) -> Result<ResolvedConfig> {
        let locale = match &self.locale {
            Some(locale) => l10n::parse_locale(locale)?,
            None => l10n::system_locale(),
        };
        let theme = self
            .theme
            .overrides
            .apply(ThemeTokens::preset(self.theme.preset))?;
        let host = match &self.host {
            Some(host) => host.apply(detected),
            None => detected,
        };
        Ok(ResolvedConfig {
            url_prefix: self
                .url_prefix
                .clone()
                .unwrap_or_else(|| TERMINAL_PREFIX.to_string()),
            locale,
            theme,
            host,
        })
    }
}
