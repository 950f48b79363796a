//! Intent resolution with browser fallback
//!
//! One linear decision per call:
//!
//! 1. decode the URL into an [`Intent`]
//! 2. if some installed app handles it, launch it
//! 3. otherwise launch `browser_fallback_url` if the intent carries one
//! 4. otherwise report [`Resolution::NotInstalled`]
//!
//! User messaging is left to the caller (see [`crate::channel`]).

use bridge_core::prelude::*;
use bridge_core::{parse_uri, ComponentName, Intent, ParseError};
use bridge_host::Platform;
use serde::Serialize;
use thiserror::Error;

/// What a successful resolution did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// An installed app handled the intent
    Launched { component: ComponentName },
    /// No app handled it; the fallback URL was opened instead
    FallbackLaunched { url: String },
    /// No app handled it and there was no fallback; nothing was launched
    NotInstalled { package: Option<String> },
}

/// Why a resolution attempt failed
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("URL is null or invalid")]
    InvalidInput,

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("invalid browser fallback URL {url:?}: {reason}")]
    InvalidFallback { url: String, reason: String },

    #[error("{0}")]
    Platform(#[from] Error),
}

impl ResolveError {
    /// Error code reported over the method channel
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::InvalidInput => "INVALID_URL",
            ResolveError::Parse(_) => "PARSE_FAILED",
            ResolveError::InvalidFallback { .. } => "INVALID_FALLBACK",
            ResolveError::Platform(_) => "RESOLUTION_FAILED",
        }
    }
}

/// Resolve `url` against `platform`, launching at most one activity.
pub fn resolve_intent<P>(platform: &mut P, url: &str) -> std::result::Result<Resolution, ResolveError>
where
    P: Platform + ?Sized,
{
    if url.trim().is_empty() {
        return Err(ResolveError::InvalidInput);
    }

    let intent = parse_uri(url)?;
    debug!("Decoded {:?} -> {}", url, intent.summary());

    if let Some(component) = platform.resolve_activity(&intent)? {
        platform.start_activity(&intent)?;
        info!("Launched {} via {}", intent.summary(), component);
        return Ok(Resolution::Launched { component });
    }

    let Some(fallback) = intent.browser_fallback_url() else {
        info!(
            "No handler for {} and no fallback URL",
            intent.summary()
        );
        return Ok(Resolution::NotInstalled {
            package: intent.target_package().map(str::to_string),
        });
    };

    let fallback = fallback.trim();
    url::Url::parse(fallback).map_err(|e| ResolveError::InvalidFallback {
        url: fallback.to_string(),
        reason: e.to_string(),
    })?;

    platform.start_activity(&Intent::view(fallback))?;
    info!("No handler for {}, opened fallback {}", intent.summary(), fallback);
    Ok(Resolution::FallbackLaunched {
        url: fallback.to_string(),
    })
}
