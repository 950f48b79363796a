//! adb-backed host platform
//!
//! Resolves and launches intents on a connected Android device:
//!
//! - capability query: `adb shell cmd package resolve-activity --brief <intent>`
//! - launch: `adb shell am start <intent>`
//!
//! adb has no way to raise a toast on the device, so notices are logged and
//! queued for the caller to drain and display.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use bridge_core::prelude::*;
use bridge_core::{ComponentName, Extra, Intent};

use crate::platform::{Notice, Platform};
use crate::tool_availability::locate_adb;

/// Platform backed by a device reachable through adb
#[derive(Debug)]
pub struct AdbPlatform {
    adb: PathBuf,
    serial: Option<String>,
    notices: Vec<Notice>,
}

impl AdbPlatform {
    /// Locate adb and target `serial` (or the only connected device)
    pub fn new(configured_adb: Option<&Path>, serial: Option<String>) -> Result<Self> {
        let adb = locate_adb(configured_adb)?;
        info!("Using adb at {} (serial: {:?})", adb.display(), serial);
        Ok(Self::with_adb(adb, serial))
    }

    /// Use an explicit adb executable without searching
    pub fn with_adb(adb: impl Into<PathBuf>, serial: Option<String>) -> Self {
        Self {
            adb: adb.into(),
            serial,
            notices: Vec::new(),
        }
    }

    /// Take the notices shown since the last drain
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Arguments for `adb`, targeting the configured device
    fn shell_args(&self, remote: &[String]) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(serial) = &self.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args.push("shell".to_string());
        args.push(remote.iter().map(|a| shell_quote(a)).collect::<Vec<_>>().join(" "));
        args
    }

    fn run_shell(&self, remote: &[String]) -> Result<Output> {
        let args = self.shell_args(remote);
        let command_line = format!("adb shell {}", remote.join(" "));
        trace!("Running {}", command_line);

        let output = Command::new(&self.adb)
            .args(&args)
            .output()
            .map_err(|e| Error::host_command(&command_line, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::host_exit(
                command_line,
                output.status.code(),
                stderr.trim().to_string(),
            ));
        }
        Ok(output)
    }
}

impl Platform for AdbPlatform {
    fn resolve_activity(&self, intent: &Intent) -> Result<Option<ComponentName>> {
        let mut remote = vec![
            "cmd".to_string(),
            "package".to_string(),
            "resolve-activity".to_string(),
            "--brief".to_string(),
        ];
        remote.extend(intent_args(intent));

        let output = self
            .run_shell(&remote)
            .map_err(|e| Error::resolve(e.to_string()))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let resolved = parse_resolve_output(&stdout);
        debug!("resolve-activity {} -> {:?}", intent.summary(), resolved);
        Ok(resolved)
    }

    fn start_activity(&mut self, intent: &Intent) -> Result<()> {
        let mut remote = vec!["am".to_string(), "start".to_string()];
        remote.extend(intent_args(intent));

        let output = self
            .run_shell(&remote)
            .map_err(|e| Error::launch(e.to_string()))?;
        check_start_output(&String::from_utf8_lossy(&output.stdout))?;
        info!("Started {}", intent.summary());
        Ok(())
    }

    fn show_notice(&mut self, notice: Notice) {
        info!("Notice ({:?}): {}", notice.duration, notice.message);
        self.notices.push(notice);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intent → am arguments
// ─────────────────────────────────────────────────────────────────────────────

/// Translate an intent into `am`-style intent arguments
pub fn intent_args(intent: &Intent) -> Vec<String> {
    let mut args = vec!["-a".to_string(), intent.action.clone()];

    if let Some(data) = &intent.data {
        args.push("-d".to_string());
        args.push(data.clone());
    }
    if let Some(mime_type) = &intent.mime_type {
        args.push("-t".to_string());
        args.push(mime_type.clone());
    }
    if let Some(identifier) = &intent.identifier {
        args.push("-i".to_string());
        args.push(identifier.clone());
    }
    for category in &intent.categories {
        args.push("-c".to_string());
        args.push(category.clone());
    }
    if intent.launch_flags != 0 {
        args.push("-f".to_string());
        args.push(format!("0x{:x}", intent.launch_flags));
    }
    for (key, extra) in &intent.extras {
        let (flag, value) = match extra {
            Extra::String(v) => ("--es", v.clone()),
            Extra::Char(v) => ("--es", v.to_string()),
            Extra::Bool(v) => ("--ez", v.to_string()),
            Extra::Byte(v) => ("--ei", v.to_string()),
            Extra::Short(v) => ("--ei", v.to_string()),
            Extra::Int(v) => ("--ei", v.to_string()),
            Extra::Long(v) => ("--el", v.to_string()),
            Extra::Float(v) => ("--ef", v.to_string()),
            Extra::Double(v) => ("--ed", v.to_string()),
        };
        args.push(flag.to_string());
        args.push(key.clone());
        args.push(value);
    }
    if let Some(component) = &intent.component {
        args.push("-n".to_string());
        args.push(component.flatten_short());
    }
    if let Some(package) = &intent.package {
        args.push("-p".to_string());
        args.push(package.clone());
    }
    if intent.selector.is_some() {
        debug!("Selector is not forwarded to am: {}", intent.summary());
    }

    args
}

/// Quote an argument for the device shell
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Read the component from `resolve-activity --brief` output.
///
/// The last non-empty line is either `pkg/cls` or `No activity found`.
pub fn parse_resolve_output(stdout: &str) -> Option<ComponentName> {
    let last = stdout.lines().map(str::trim).rfind(|l| !l.is_empty())?;
    if last.contains(char::is_whitespace) {
        return None;
    }
    ComponentName::unflatten(last)
}

/// `am start` reports most failures on stdout with exit code 0
pub fn check_start_output(stdout: &str) -> Result<()> {
    match stdout
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("Error:") || l.starts_with("Error type"))
    {
        Some(line) => Err(Error::launch(line.to_string())),
        None => Ok(()),
    }
}
