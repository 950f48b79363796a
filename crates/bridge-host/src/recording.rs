//! In-memory platform that records what would have happened
//!
//! Backs `--dry-run` and the test suites. An intent resolves when its target
//! package is in the installed set; package-less intents resolve when their
//! data scheme has a handler (browsers always handle `http`/`https`).

use std::collections::BTreeSet;

use bridge_core::prelude::*;
use bridge_core::{ComponentName, Intent};

use crate::platform::{Notice, Platform};

/// Schemes every device can open in a browser
const BROWSER_SCHEMES: &[&str] = &["http", "https"];

/// Class name reported for resolved packages
const LAUNCHER_CLASS: &str = ".MainActivity";

/// Platform that simulates an installed package set and records side effects
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    installed: BTreeSet<String>,
    handled_schemes: BTreeSet<String>,
    /// Intents passed to `start_activity`, in order
    pub launches: Vec<Intent>,
    /// Notices shown, in order
    pub notices: Vec<Notice>,
    /// Make every `start_activity` fail with this message
    pub fail_launch: Option<String>,
    /// Make every `resolve_activity` fail with this message
    pub fail_resolve: Option<String>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform with the given packages installed
    pub fn with_installed<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: packages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Register extra URL schemes that some installed app handles
    pub fn with_handled_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handled_schemes
            .extend(schemes.into_iter().map(|s| s.into().to_ascii_lowercase()));
        self
    }

    pub fn is_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }

    /// Data URLs of all launches, in order
    pub fn launched_urls(&self) -> Vec<&str> {
        self.launches
            .iter()
            .filter_map(|intent| intent.data.as_deref())
            .collect()
    }

    /// Take the notices shown since the last drain
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn handles_scheme(&self, scheme: &str) -> bool {
        BROWSER_SCHEMES.contains(&scheme) || self.handled_schemes.contains(scheme)
    }
}

impl Platform for RecordingPlatform {
    fn resolve_activity(&self, intent: &Intent) -> Result<Option<ComponentName>> {
        if let Some(message) = &self.fail_resolve {
            return Err(Error::resolve(message.clone()));
        }

        if let Some(component) = &intent.component {
            return Ok(self
                .is_installed(&component.package)
                .then(|| component.clone()));
        }

        if let Some(package) = &intent.package {
            return Ok(self
                .is_installed(package)
                .then(|| ComponentName::unflatten(&format!("{}/{}", package, LAUNCHER_CLASS)))
                .flatten());
        }

        let resolved = intent
            .data_scheme()
            .filter(|scheme| self.handles_scheme(scheme))
            .map(|scheme| ComponentName::new(format!("handler.{}", scheme), "Viewer"));
        trace!("Dry-run resolve {} -> {:?}", intent.summary(), resolved);
        Ok(resolved)
    }

    fn start_activity(&mut self, intent: &Intent) -> Result<()> {
        if let Some(message) = &self.fail_launch {
            return Err(Error::launch(message.clone()));
        }
        info!("Dry-run launch {}", intent.summary());
        self.launches.push(intent.clone());
        Ok(())
    }

    fn show_notice(&mut self, notice: Notice) {
        info!("Dry-run notice ({:?}): {}", notice.duration, notice.message);
        self.notices.push(notice);
    }
}
