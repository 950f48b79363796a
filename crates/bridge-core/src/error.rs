//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Host Tool Errors
    // ─────────────────────────────────────────────────────────────
    #[error("adb not found. Ensure Android platform-tools are in your PATH or set ANDROID_HOME.")]
    AdbNotFound,

    #[error("Failed to run host command '{command}': {reason}")]
    HostCommand { command: String, reason: String },

    #[error("Host command '{command}' exited with code {code:?}: {stderr}")]
    HostExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Platform Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Activity resolution failed: {message}")]
    Resolve { message: String },

    #[error("Activity launch failed: {message}")]
    Launch { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Channel Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed method call: {message}")]
    MalformedCall { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn host_command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HostCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn host_exit(command: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::HostExit {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    pub fn resolve(message: impl Into<String>) -> Self {
        Self::Resolve {
            message: message.into(),
        }
    }

    pub fn launch(message: impl Into<String>) -> Self {
        Self::Launch {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn malformed_call(message: impl Into<String>) -> Self {
        Self::MalformedCall {
            message: message.into(),
        }
    }

    /// Check if this error should stop the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::AdbNotFound | Error::ConfigNotFound { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Log the error with lazily built context, then pass it through
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
