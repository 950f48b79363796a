//! Locating the `adb` executable
//!
//! Checks an explicitly configured path first, then `PATH`, then the
//! platform-tools directory of the Android SDK (`ANDROID_HOME`,
//! `ANDROID_SDK_ROOT`).

use std::path::{Path, PathBuf};

use bridge_core::prelude::*;

#[cfg(windows)]
const ADB_BINARY: &str = "adb.exe";
#[cfg(not(windows))]
const ADB_BINARY: &str = "adb";

/// Find the adb executable
pub fn locate_adb(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            debug!("Using configured adb at {}", path.display());
            return Ok(path.to_path_buf());
        }
        warn!(
            "Configured adb path {} does not exist, searching instead",
            path.display()
        );
    }

    if let Ok(path) = which::which("adb") {
        debug!("Found adb in PATH at {}", path.display());
        return Ok(path);
    }

    get_sdk_adb_paths()
        .into_iter()
        .find(|path| path.is_file())
        .inspect(|path| debug!("Found adb in SDK at {}", path.display()))
        .ok_or(Error::AdbNotFound)
}

/// Get SDK locations to try for adb
fn get_sdk_adb_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // ANDROID_HOME/platform-tools/adb
    if let Ok(android_home) = std::env::var("ANDROID_HOME") {
        paths.push(PathBuf::from(android_home).join("platform-tools").join(ADB_BINARY));
    }

    // ANDROID_SDK_ROOT/platform-tools/adb
    if let Ok(sdk_root) = std::env::var("ANDROID_SDK_ROOT") {
        paths.push(PathBuf::from(sdk_root).join("platform-tools").join(ADB_BINARY));
    }

    paths
}

/// User-friendly hint when adb cannot be found
pub fn adb_unavailable_message() -> &'static str {
    "Android platform-tools not found. Set ANDROID_HOME, add adb to PATH, or use --dry-run."
}
