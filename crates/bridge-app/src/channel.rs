//! Method channel endpoint
//!
//! The application layer calls into the bridge with a [`MethodCall`] such as
//!
//! ```json
//! {"method": "handleIntent", "arguments": {"url": "intent://..."}}
//! ```
//!
//! and gets a [`MethodResponse`] back. [`FailurePolicy`] decides whether
//! resolution failures become notices (lenient) or errors (strict).

use bridge_core::prelude::*;
use bridge_host::{Notice, NoticeDuration, Platform};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{FailurePolicy, Settings};
use crate::messages::{MessageKey, Messages};
use crate::resolver::{resolve_intent, Resolution, ResolveError};

/// The only method this channel implements
pub const METHOD_HANDLE_INTENT: &str = "handleIntent";

/// Result string of every successful `handleIntent` call
pub const SUCCESS_MESSAGE: &str = "Intent handled successfully.";

/// Error code for a missing or unusable `url` argument
pub const INVALID_URL_CODE: &str = "INVALID_URL";

/// Error code for strict-mode "no handler, no fallback"
pub const NOT_INSTALLED_CODE: &str = "NOT_INSTALLED";

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

/// An incoming call from the application layer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MethodCall {
    pub method: String,

    #[serde(default, alias = "args")]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Build a `handleIntent` call for `url`
    pub fn handle_intent(url: impl Into<String>) -> Self {
        Self::new(METHOD_HANDLE_INTENT, json!({ "url": url.into() }))
    }

    /// Parse one JSON-encoded call
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::malformed_call(e.to_string()))
    }
}

/// Arguments of `handleIntent`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandleIntentArgs {
    #[serde(default)]
    pub url: Option<String>,
}

/// Reply sent back to the application layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        result: Value,
        /// What the call did; only reported under [`FailurePolicy::Strict`]
        #[serde(skip_serializing_if = "Option::is_none")]
        resolution: Option<Resolution>,
    },
    Error {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        Self::Success {
            result: result.into(),
            resolution: None,
        }
    }

    /// Success that also reports the resolution outcome
    pub fn resolved(result: impl Into<Value>, resolution: Resolution) -> Self {
        Self::Success {
            result: result.into(),
            resolution: Some(resolution),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }

    /// Error code, if this is an error response
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResponse::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IntentChannel
// ─────────────────────────────────────────────────────────────────────────────

/// `handleIntent` endpoint bound to one host platform
#[derive(Debug)]
pub struct IntentChannel<P> {
    name: String,
    platform: P,
    policy: FailurePolicy,
    messages: Messages,
    notice_duration: NoticeDuration,
}

impl<P: Platform> IntentChannel<P> {
    /// Channel with default settings (lenient, Korean notices)
    pub fn new(platform: P) -> Self {
        Self::from_settings(platform, &Settings::default())
    }

    pub fn from_settings(platform: P, settings: &Settings) -> Self {
        Self {
            name: settings.channel.name.clone(),
            platform,
            policy: settings.channel.failure_policy,
            messages: Messages::new(settings.notices.locale)
                .with_overrides(settings.notices.overrides.clone()),
            notice_duration: settings.notices.duration,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Dispatch one call
    pub fn handle(&mut self, call: &MethodCall) -> MethodResponse {
        if call.method != METHOD_HANDLE_INTENT {
            debug!("[{}] method not implemented: {}", self.name, call.method);
            return MethodResponse::NotImplemented;
        }

        match HandleIntentArgs::deserialize(&call.arguments) {
            Ok(args) => self.handle_intent(args.url.as_deref()),
            Err(e) => {
                warn!("[{}] unusable handleIntent arguments: {}", self.name, e);
                invalid_url()
            }
        }
    }

    /// `handleIntent` with an already extracted argument
    pub fn handle_intent(&mut self, url: Option<&str>) -> MethodResponse {
        let Some(url) = url else {
            return invalid_url();
        };

        let outcome = resolve_intent(&mut self.platform, url);
        if let Err(e) = &outcome {
            warn!("[{}] handleIntent failed for {:?}: {}", self.name, url, e);
        }

        match (outcome, self.policy) {
            (Err(ResolveError::InvalidInput), _) => invalid_url(),

            (Ok(Resolution::NotInstalled { .. }), FailurePolicy::Lenient) => {
                self.notify(MessageKey::AppNotInstalled, &[]);
                MethodResponse::success(SUCCESS_MESSAGE)
            }
            (Ok(_), FailurePolicy::Lenient) => MethodResponse::success(SUCCESS_MESSAGE),
            (Err(e), FailurePolicy::Lenient) => {
                let error = e.to_string();
                self.notify(MessageKey::LaunchFailed, &[("error", error.as_str())]);
                MethodResponse::success(SUCCESS_MESSAGE)
            }

            (Ok(Resolution::NotInstalled { package }), FailurePolicy::Strict) => {
                MethodResponse::error(
                    NOT_INSTALLED_CODE,
                    self.messages.render(MessageKey::AppNotInstalled, &[]),
                    Some(json!({ "package": package })),
                )
            }
            (Ok(resolution), FailurePolicy::Strict) => {
                MethodResponse::resolved(SUCCESS_MESSAGE, resolution)
            }
            (Err(e), FailurePolicy::Strict) => MethodResponse::error(e.code(), e.to_string(), None),
        }
    }

    fn notify(&mut self, key: MessageKey, args: &[(&str, &str)]) {
        let message = self.messages.render(key, args);
        self.platform
            .show_notice(Notice::new(message, self.notice_duration));
    }
}

fn invalid_url() -> MethodResponse {
    MethodResponse::error(INVALID_URL_CODE, "URL is null or invalid", None)
}
