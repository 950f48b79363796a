//! # bridge-core - Core Domain Types
//!
//! Foundation crate for intent-bridge. Provides the intent (action
//! descriptor) model, intent-scheme URI decoding, error handling and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, url, percent-encoding).
//!
//! ## Public API
//!
//! ### Intents (`intent`)
//! - [`Intent`] - Decoded action descriptor (action, data, package, extras)
//! - [`Extra`] - Typed extra value
//! - [`ComponentName`] - `package/class` activity name
//!
//! ### URI Decoding (`uri`)
//! - [`parse_uri()`] - Decode an `intent:` URI or plain URL into an [`Intent`]
//! - [`ParseError`] - Why a URI could not be decoded
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Host/config/channel error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Logs an error with context while propagating it
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use bridge_core::prelude::*;
//! ```

pub mod error;
pub mod intent;
pub mod logging;
pub mod uri;

/// Prelude for common imports used throughout all intent-bridge crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use intent::{ComponentName, Extra, Intent, ACTION_VIEW, EXTRA_BROWSER_FALLBACK_URL};
pub use uri::{parse_uri, ParseError};
