//! Error relay - prepend context to in-flight Mongo errors.
//!
//! A relay sits between an inner scope that failed and an outer scope that
//! will see the failure. It makes one decision, by [`is_in_range`]:
//!
//! - **Mongo error**: the message becomes `prefix + message`, verbatim, with
//!   no separator added
//! - **Foreign error**: the record passes through byte-for-byte
//!
//! In both cases the code, severity and all other host metadata are the
//! ones the error was raised with.
//!
//! # Composition
//!
//! Each relay wraps the message produced by the relays inside it, so after
//! relays `p1` (innermost) to `pN` (outermost) the message reads
//! `pN + ... + p1 + original`:
//!
//! ```rust
//! use helio_errors::{mongo, mongo_error, RelayExt, Result};
//!
//! fn inner() -> Result<()> {
//!     Err(mongo_error!(BadValue, "X")).relay_prefix("inner: ")
//! }
//!
//! fn outer() -> Result<()> {
//!     inner().relay_prefix("outer: ")
//! }
//!
//! let err = outer().unwrap_err();
//! assert_eq!(err.message(), "outer: inner: X");
//! assert_eq!(err.code(), mongo::BadValue.host());
//! ```

use crate::{is_in_range, ErrorRecord, Result};

impl ErrorRecord {
    /// Prepend `prefix` to the message of a Mongo error.
    ///
    /// Returns whether the message was rewritten; foreign records are left
    /// untouched and return `false`.
    pub fn prepend_message(&mut self, prefix: &str) -> bool {
        if !is_in_range(self.code) {
            return false;
        }

        let mut message = String::with_capacity(prefix.len() + self.message.len());
        message.push_str(prefix);
        message.push_str(&self.message);
        self.replace_message(message);
        true
    }
}

/// Relay an owned record: prepend `prefix` if it is a Mongo error, and hand
/// it back for further propagation.
#[inline]
pub fn relay_with_prefix(mut record: ErrorRecord, prefix: &str) -> ErrorRecord {
    record.prepend_message(prefix);
    record
}

/// Relay errors as they propagate through `Result` return paths.
pub trait RelayExt<T> {
    /// Prepend `prefix` to a Mongo error; pass `Ok` and foreign errors through.
    fn relay_prefix(self, prefix: &str) -> Result<T>;

    /// Like [`relay_prefix`](Self::relay_prefix), building the prefix only
    /// when there is a Mongo error to prepend it to.
    fn relay_prefix_with<P, F>(self, prefix: F) -> Result<T>
    where
        P: AsRef<str>,
        F: FnOnce() -> P;
}

impl<T> RelayExt<T> for Result<T> {
    #[inline]
    fn relay_prefix(self, prefix: &str) -> Result<T> {
        self.map_err(|record| relay_with_prefix(record, prefix))
    }

    #[inline]
    fn relay_prefix_with<P, F>(self, prefix: F) -> Result<T>
    where
        P: AsRef<str>,
        F: FnOnce() -> P,
    {
        self.map_err(|record| {
            if record.is_mongo_error() {
                relay_with_prefix(record, prefix().as_ref())
            } else {
                record
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mongo, sqlstate, HostErrorCode, Severity, RANGE_BASE, RANGE_END};
    use std::cell::Cell;

    #[test]
    fn prefixes_mongo_error() {
        let err = relay_with_prefix(ErrorRecord::mongo(&mongo::BadValue, "bad input"), "ctx: ");
        assert_eq!(err.code(), mongo::BadValue.host());
        assert_eq!(err.message(), "ctx: bad input");
    }

    #[test]
    fn foreign_error_passes_through() {
        let mut err = ErrorRecord::new(sqlstate::DIVISION_BY_ZERO, "division by zero");
        assert!(!err.prepend_message("ctx: "));
        assert_eq!(err.code(), sqlstate::DIVISION_BY_ZERO);
        assert_eq!(err.message(), "division by zero");
    }

    #[test]
    fn window_edges_are_relayed() {
        let base = relay_with_prefix(ErrorRecord::new(RANGE_BASE, "m"), "p: ");
        let end = relay_with_prefix(ErrorRecord::new(RANGE_END, "m"), "p: ");
        let past = relay_with_prefix(
            ErrorRecord::new(HostErrorCode::from_raw(RANGE_END.value() + 1), "m"),
            "p: ",
        );
        assert_eq!(base.message(), "p: m");
        assert_eq!(end.message(), "p: m");
        assert_eq!(past.message(), "m");
    }

    #[test]
    fn no_separator_is_inserted() {
        let err = relay_with_prefix(ErrorRecord::mongo(&mongo::BadValue, "b"), "a");
        assert_eq!(err.message(), "ab");

        let err = relay_with_prefix(ErrorRecord::mongo(&mongo::BadValue, "b"), "");
        assert_eq!(err.message(), "b");
    }

    #[test]
    fn host_metadata_is_preserved() {
        let err = ErrorRecord::mongo(&mongo::Overflow, "too big")
            .with_severity(Severity::Fatal)
            .with_detail("value: 1e400")
            .with_hint("use a decimal")
            .with_metadata("field", "price");
        let location = err.location();

        let err = relay_with_prefix(err, "$add: ");

        assert_eq!(err.message(), "$add: too big");
        assert_eq!(err.code(), mongo::Overflow.host());
        assert_eq!(err.severity(), Severity::Fatal);
        assert_eq!(err.detail(), Some("value: 1e400"));
        assert_eq!(err.hint(), Some("use a decimal"));
        assert_eq!(err.location(), location);
        assert_eq!(err.metadata()[0].1.as_str(), "price");
    }

    #[test]
    fn literal_bad_value_scenario() {
        let result: Result<()> = Err(ErrorRecord::mongo(&mongo::BadValue, "field missing"));
        let err = result.relay_prefix("parse error: ").unwrap_err();
        assert_eq!(err.code().value(), RANGE_BASE.value() + 2);
        assert_eq!(err.message(), "parse error: field missing");
    }

    #[test]
    fn nested_relays_compose_outer_to_inner() {
        fn level_one() -> Result<()> {
            Err(ErrorRecord::mongo(&mongo::TypeMismatch, "X")).relay_prefix("inner: ")
        }
        fn level_two() -> Result<()> {
            level_one().relay_prefix("middle: ")
        }
        fn level_three() -> Result<()> {
            level_two().relay_prefix("outer: ")
        }

        let err = level_three().unwrap_err();
        assert_eq!(err.message(), "outer: middle: inner: X");
        assert_eq!(err.code(), mongo::TypeMismatch.host());
    }

    #[test]
    fn ok_values_pass_through() {
        let result: Result<u32> = Ok(7);
        assert_eq!(result.relay_prefix("ctx: ").unwrap(), 7);
    }

    #[test]
    fn lazy_prefix_only_built_for_mongo_errors() {
        let calls = Cell::new(0);
        let prefix = || {
            calls.set(calls.get() + 1);
            format!("while processing field {}: ", "a.b")
        };

        let foreign: Result<()> = Err(ErrorRecord::new(sqlstate::INTERNAL_ERROR, "boom"));
        let err = foreign.relay_prefix_with(prefix).unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(calls.get(), 0);

        let ok: Result<()> = Ok(());
        assert!(ok.relay_prefix_with(prefix).is_ok());
        assert_eq!(calls.get(), 0);

        let mongo: Result<()> = Err(ErrorRecord::mongo(&mongo::PathNotViable, "no path"));
        let err = mongo.relay_prefix_with(prefix).unwrap_err();
        assert_eq!(err.message(), "while processing field a.b: no path");
        assert_eq!(calls.get(), 1);
    }
}
