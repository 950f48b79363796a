//! # bridge-host - Host Platform Access
//!
//! Everything intent-bridge needs from the host OS: resolving which activity
//! handles an intent, launching it, and showing transient notices.
//!
//! Depends on [`bridge_core`] for the intent model and error handling.
//!
//! ## Public API
//!
//! ### Contract
//! - [`Platform`] - Capability query, launch and notice operations
//! - [`Notice`], [`NoticeDuration`] - Transient user-visible messages
//!
//! ### Implementations
//! - [`AdbPlatform`] - Talks to a connected Android device through `adb`
//! - [`RecordingPlatform`] - Simulated installed-package set, records side effects
//!
//! ### Tool Discovery
//! - [`locate_adb()`] - Find the adb executable (config, PATH, Android SDK)

pub mod adb;
pub mod platform;
pub mod recording;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

// Public API re-exports
pub use adb::AdbPlatform;
pub use platform::{Notice, NoticeDuration, Platform};
pub use recording::RecordingPlatform;
pub use tool_availability::{adb_unavailable_message, locate_adb};
