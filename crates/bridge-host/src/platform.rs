//! Host platform contract
//!
//! The resolver only talks to the host through [`Platform`]: a read-only
//! capability query, a side-effecting launch, and a transient notice.

use bridge_core::prelude::*;
use bridge_core::{ComponentName, Intent};
use serde::{Deserialize, Serialize};

/// How long a transient notice stays visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeDuration {
    Short,
    #[default]
    Long,
}

/// A short-lived, non-blocking user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub duration: NoticeDuration,
}

impl Notice {
    pub fn new(message: impl Into<String>, duration: NoticeDuration) -> Self {
        Self {
            message: message.into(),
            duration,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self::new(message, NoticeDuration::Long)
    }
}

/// Host operations needed to resolve and launch intents.
///
/// Calls are synchronous and happen on the caller's thread.
pub trait Platform {
    /// Find the activity that would handle `intent`, without launching anything.
    ///
    /// `Ok(None)` means no installed application can handle it.
    fn resolve_activity(&self, intent: &Intent) -> Result<Option<ComponentName>>;

    /// Launch `intent`, bringing the handling application to the foreground.
    fn start_activity(&mut self, intent: &Intent) -> Result<()>;

    /// Show a transient notice to the user.
    fn show_notice(&mut self, notice: Notice);
}
