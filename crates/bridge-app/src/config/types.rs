//! Configuration types for intent-bridge
//!
//! Defines:
//! - `Settings` - Application settings (.intent-bridge/config.toml)
//! - `FailurePolicy` - How resolution failures cross the channel boundary
//! - Related sub-types

use bridge_host::NoticeDuration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::messages::{Locale, MessageKey};

/// Channel name used when none is configured
pub const DEFAULT_CHANNEL_NAME: &str = "com.bottlenote.official.app/intents";

/// How failures after argument validation are reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Show a notice and report success (the caller cannot tell failures apart)
    #[default]
    Lenient,
    /// Return a structured error and leave user messaging to the caller.
    /// Successes keep the plain result string and add a `resolution` field.
    Strict,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Lenient => write!(f, "lenient"),
            FailurePolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Application settings (.intent-bridge/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub channel: ChannelSettings,

    #[serde(default)]
    pub notices: NoticeSettings,

    #[serde(default)]
    pub adb: AdbSettings,

    #[serde(default)]
    pub dry_run: DryRunSettings,
}

/// Method channel settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelSettings {
    /// Channel identifier the application layer calls into
    #[serde(default = "default_channel_name")]
    pub name: String,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            name: default_channel_name(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

/// Transient notice settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NoticeSettings {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub duration: NoticeDuration,

    /// Replacement templates per message key
    #[serde(default)]
    pub overrides: HashMap<MessageKey, String>,
}

/// adb settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdbSettings {
    /// Explicit adb executable (searched in PATH / Android SDK if unset)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Device serial (`adb -s`); unset means the only connected device
    #[serde(default)]
    pub serial: Option<String>,
}

/// Simulated device used by `--dry-run`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DryRunSettings {
    /// Packages treated as installed
    #[serde(default)]
    pub installed_packages: Vec<String>,

    /// URL schemes (besides http/https) some installed app handles
    #[serde(default)]
    pub handled_schemes: Vec<String>,
}
