//! # Helio Errors
//!
//! Mongo error taxonomy embedded in the host's SQLSTATE error space, with a
//! relay that adds context to in-flight Mongo errors without touching their
//! code.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are a contract**: every registered Mongo error has a fixed
//!    native code and a host code computed once, at compile time
//! 2. **Membership is arithmetic**: one O(1) range check decides whether a
//!    host error is ours
//! 3. **Relays annotate, never reclassify**: context is prepended to the
//!    message of Mongo errors; codes, severity and every other field pass
//!    through untouched, and foreign errors pass through entirely
//! 4. **Bad registrations never ship**: an out-of-range code fails const
//!    evaluation, and the table is re-checked at startup
//!
//! ## Quick Start
//!
//! ```rust
//! use helio_errors::{mongo, mongo_error, RelayExt, Result};
//!
//! fn parse_field(value: i64) -> Result<u32> {
//!     u32::try_from(value).map_err(|_| mongo_error!(BadValue, "field missing"))
//! }
//!
//! fn parse_document(value: i64) -> Result<u32> {
//!     parse_field(value).relay_prefix("parse error: ")
//! }
//!
//! let err = parse_document(-1).unwrap_err();
//! assert_eq!(err.code(), mongo::BadValue.host());
//! assert_eq!(err.message(), "parse error: field missing");
//! ```
//!
//! ## Unwinding Hosts
//!
//! Where errors travel by unwinding rather than by `Result`, the
//! [`host`] module provides the try/catch/rethrow shape:
//!
//! ```rust
//! use helio_errors::{host::{relay_active_error, ThreadHost}, mongo, raise_mongo_error};
//!
//! let caught = ThreadHost::catch_raised(|| {
//!     ThreadHost::try_catch(
//!         || -> () { raise_mongo_error!(TypeMismatch, "expected array") },
//!         || relay_active_error(&ThreadHost, "$size: "),
//!     )
//! });
//!
//! let err = caught.unwrap_err();
//! assert_eq!(err.code(), mongo::TypeMismatch.host());
//! assert_eq!(err.message(), "$size: expected array");
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: Enable detailed debug formatting for trusted environments (debug builds only)
//! - `strict_registry`: Treat native codes shared by several names as a registry violation

#![warn(missing_docs)]
#![warn(clippy::all)]

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::result;
use zeroize::Zeroize;

pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod host;
pub mod logging;
pub mod models;
pub mod registry;
pub mod relay;

pub use codes::*;
pub use definitions as mongo;
pub use logging::*;
pub use models::*;
pub use registry::*;
pub use relay::*;

/// Type alias for Results carrying a host error record.
pub type Result<T> = result::Result<T, ErrorRecord>;

// ============================================================================
// Error Record
// ============================================================================

/// An error as the host reports it: code, message, and host metadata.
///
/// # Key Properties
///
/// - `code` is fixed at construction; nothing in this crate changes it
/// - `message` is the only field a relay rewrites, and only for Mongo codes
/// - `severity`, `detail`, `hint`, `location` and `metadata` are carried
///   through every relay unchanged
/// - Owned text is zeroized on drop, including messages replaced by a relay
///
/// # No-Clone Semantics
///
/// A record has a single owner as it travels up the call chain. Relays take
/// it by value and hand it back, so no stale copy with an older message can
/// be reported by mistake.
#[derive(Debug)]
#[must_use = "errors should be raised, relayed or reported"]
pub struct ErrorRecord {
    code: HostErrorCode,
    message: String,
    severity: Severity,
    detail: Option<String>,
    hint: Option<String>,
    location: SourceLocation,
    metadata: SmallVec<[(&'static str, ContextField); 4]>,
}

impl ErrorRecord {
    /// Create a record for any host code, Mongo or foreign.
    #[inline]
    #[track_caller]
    pub fn new(code: HostErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
            detail: None,
            hint: None,
            location: SourceLocation::caller(),
            metadata: SmallVec::new(),
        }
    }

    /// Create a record for a registered Mongo error.
    #[inline]
    #[track_caller]
    pub fn mongo(error: &MongoError, message: impl Into<String>) -> Self {
        Self::new(error.host(), message)
    }

    /// Fatal record for a broken caller contract (SQLSTATE `XX000`).
    #[track_caller]
    pub(crate) fn internal_fatal(message: impl Into<String>) -> Self {
        Self::new(sqlstate::INTERNAL_ERROR, message).with_severity(Severity::Fatal)
    }

    /// Set the severity.
    #[inline]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attach a detail line.
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a hint line.
    #[inline]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add tracking metadata (request IDs, collection names, etc.)
    #[inline]
    pub fn with_metadata(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.metadata.push((key, ContextField::from(value.into())));
        self
    }

    /// Host error code.
    #[inline]
    pub const fn code(&self) -> HostErrorCode {
        self.code
    }

    /// SQLSTATE of the host error code.
    #[inline]
    pub const fn sqlstate(&self) -> SqlState {
        self.code.sqlstate()
    }

    /// Message, including every prefix added by relays so far.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity.
    #[inline]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Detail line, if any.
    #[inline]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Hint line, if any.
    #[inline]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Where the record was created.
    #[inline]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    /// Tracking metadata.
    #[inline]
    pub fn metadata(&self) -> &[(&'static str, ContextField)] {
        &self.metadata
    }

    /// Whether the code lies in the reserved Mongo window.
    #[inline]
    pub const fn is_mongo_error(&self) -> bool {
        is_in_range(self.code)
    }

    /// Native Mongo code, for Mongo errors.
    #[inline]
    pub const fn native_code(&self) -> Option<NativeErrorCode> {
        decode(self.code)
    }

    /// Registered entry for the code, if any.
    ///
    /// When several names share the code, the first declared one is returned.
    pub fn mongo_error(&self) -> Option<&'static MongoError> {
        registry::builtin().by_host_code(self.code).next()
    }

    /// Replace the message, zeroizing the old one.
    #[inline]
    pub(crate) fn replace_message(&mut self, message: String) {
        let mut old = std::mem::replace(&mut self.message, message);
        old.zeroize();
    }
}

impl Zeroize for ErrorRecord {
    fn zeroize(&mut self) {
        self.message.zeroize();
        if let Some(ref mut detail) = self.detail {
            detail.zeroize();
        }
        if let Some(ref mut hint) = self.hint {
            hint.zeroize();
        }
        for (_, value) in &mut self.metadata {
            value.zeroize();
        }
        self.metadata.clear();
    }
}

impl Drop for ErrorRecord {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Display for ErrorRecord {
    /// The client-visible message.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorRecord {}
