//! intent-bridge Library
//!
//! Resolves deep-link intent URLs on an Android host, falling back to the
//! browser, behind a typed `handleIntent` method channel.

pub mod output;

use std::io::{BufRead, Write};
use std::path::Path;

use bridge_app::{IntentChannel, MethodCall, MethodResponse, Settings};
use bridge_core::prelude::*;
use bridge_core::{parse_uri, ComponentName, Intent};
use bridge_host::{AdbPlatform, Notice, Platform, RecordingPlatform};

use output::{write_json_line, OutputEvent};

// Re-export the pieces callers need
pub use bridge_app::{config, FailurePolicy, Locale};

// ─────────────────────────────────────────────────────────────────────────────
// Host selection
// ─────────────────────────────────────────────────────────────────────────────

/// The platform chosen at startup
#[derive(Debug)]
pub enum HostPlatform {
    Adb(AdbPlatform),
    DryRun(RecordingPlatform),
}

impl HostPlatform {
    /// Build the platform from settings: recording for dry runs, adb otherwise
    pub fn from_settings(settings: &Settings, dry_run: bool) -> Result<Self> {
        if dry_run {
            let platform =
                RecordingPlatform::with_installed(settings.dry_run.installed_packages.clone())
                    .with_handled_schemes(settings.dry_run.handled_schemes.clone());
            info!(
                "Dry run with {} installed package(s)",
                settings.dry_run.installed_packages.len()
            );
            return Ok(Self::DryRun(platform));
        }

        AdbPlatform::new(settings.adb.path.as_deref(), settings.adb.serial.clone()).map(Self::Adb)
    }

    /// Take the notices shown since the last drain
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        match self {
            HostPlatform::Adb(p) => p.drain_notices(),
            HostPlatform::DryRun(p) => p.drain_notices(),
        }
    }
}

impl Platform for HostPlatform {
    fn resolve_activity(&self, intent: &Intent) -> Result<Option<ComponentName>> {
        match self {
            HostPlatform::Adb(p) => p.resolve_activity(intent),
            HostPlatform::DryRun(p) => p.resolve_activity(intent),
        }
    }

    fn start_activity(&mut self, intent: &Intent) -> Result<()> {
        match self {
            HostPlatform::Adb(p) => p.start_activity(intent),
            HostPlatform::DryRun(p) => p.start_activity(intent),
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        match self {
            HostPlatform::Adb(p) => p.show_notice(notice),
            HostPlatform::DryRun(p) => p.show_notice(notice),
        }
    }
}

/// Load settings for `project_path`, or from an explicit file
pub fn load_settings(project_path: &Path, config_file: Option<&Path>) -> Result<Settings> {
    match config_file {
        Some(file) => config::load_settings_file(file),
        None => Ok(config::load_settings(project_path)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run one `handleIntent` call; the response goes to `out`, notices to `events`
pub fn run_resolve<W: Write, E: Write>(
    channel: &mut IntentChannel<HostPlatform>,
    url: &str,
    out: &mut W,
    events: &mut E,
) -> Result<MethodResponse> {
    let response = channel.handle(&MethodCall::handle_intent(url));
    flush_notices(channel, events)?;
    write_json_line(out, &response)?;
    Ok(response)
}

/// Decode `url` and print the intent as pretty JSON
pub fn run_parse<W: Write>(url: &str, out: &mut W) -> Result<()> {
    let intent = parse_uri(url).map_err(|e| Error::malformed_call(e.to_string()))?;
    serde_json::to_writer_pretty(&mut *out, &intent)?;
    writeln!(out)?;
    Ok(())
}

/// Counters for a `serve` session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub calls: usize,
    pub errors: usize,
    pub rejected_lines: usize,
}

/// Answer one JSON method call per input line until EOF
pub fn serve<R: BufRead, W: Write, E: Write>(
    channel: &mut IntentChannel<HostPlatform>,
    input: R,
    out: &mut W,
    events: &mut E,
) -> Result<ServeStats> {
    let mut stats = ServeStats::default();
    info!("Serving channel {} on stdin", channel.name());

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let call = match MethodCall::parse(&line) {
            Ok(call) => call,
            Err(e) => {
                warn!("Rejected input line {}: {}", index + 1, e);
                stats.rejected_lines += 1;
                write_json_line(events, &OutputEvent::input_error(index + 1, e.to_string()))?;
                continue;
            }
        };

        let response = channel.handle(&call);
        stats.calls += 1;
        if !response.is_success() {
            stats.errors += 1;
        }
        flush_notices(channel, events)?;
        write_json_line(out, &response)?;
    }

    info!(
        "Input closed after {} call(s), {} error(s), {} rejected line(s)",
        stats.calls, stats.errors, stats.rejected_lines
    );
    Ok(stats)
}

fn flush_notices<E: Write>(channel: &mut IntentChannel<HostPlatform>, events: &mut E) -> Result<()> {
    for notice in channel.platform_mut().drain_notices() {
        write_json_line(events, &OutputEvent::notice(notice))?;
    }
    Ok(())
}
