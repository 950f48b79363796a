//! bridge-app - Intent resolution and method channel dispatch for intent-bridge
//!
//! Wires the intent decoder from `bridge-core` and a host [`bridge_host::Platform`]
//! into a `handleIntent` method channel, with configuration loading and
//! localized user notices.

pub mod channel;
pub mod config;
pub mod messages;
pub mod resolver;

// Re-export primary types
pub use channel::{
    HandleIntentArgs, IntentChannel, MethodCall, MethodResponse, METHOD_HANDLE_INTENT,
    SUCCESS_MESSAGE,
};
pub use config::{FailurePolicy, Settings};
pub use messages::{Locale, MessageKey, Messages};
pub use resolver::{resolve_intent, Resolution, ResolveError};
