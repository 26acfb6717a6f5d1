//! Structured log entry for error records.
//!
//! # Properties
//!
//! - Borrows from [`ErrorRecord`] with an explicit lifetime
//! - CANNOT outlive the record that created it
//! - No heap allocations in accessors
//! - Output fields are truncated so one oversized message cannot flood a log
//!
//! The entry is a view for the duration of a logging call. It never copies
//! the message, so a record relayed afterwards is logged with its new message
//! the next time, and the old text is zeroized with the record.

use crate::{ErrorRecord, HostErrorCode, MongoError, NativeErrorCode, Severity, SourceLocation};
use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Metadata value wrapper with zeroization for owned data.
///
/// Borrowed values are assumed static and are not zeroized.
#[derive(Debug)]
pub struct ContextField {
    value: Cow<'static, str>,
}

impl ContextField {
    /// Borrow the value.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl From<&'static str> for ContextField {
    fn from(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl From<String> for ContextField {
    fn from(value: String) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl From<Cow<'static, str>> for ContextField {
    fn from(value: Cow<'static, str>) -> Self {
        Self { value }
    }
}

impl Zeroize for ContextField {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for ContextField {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Structured log entry with borrowed data from an [`ErrorRecord`].
///
/// # Example
///
/// ```rust
/// # use helio_errors::mongo_error;
/// let err = mongo_error!(BadValue, "field missing");
/// let log = err.internal_log();
/// assert_eq!(log.code_name(), Some("BadValue"));
/// // log is destroyed when it goes out of scope
/// ```
#[derive(Debug)]
pub struct RecordLog<'a> {
    pub code: HostErrorCode,
    pub mongo: Option<&'static MongoError>,
    pub severity: Severity,
    pub message: &'a str,
    pub detail: Option<&'a str>,
    pub hint: Option<&'a str>,
    pub location: SourceLocation,
    pub metadata: &'a [(&'static str, ContextField)],
}

impl<'a> RecordLog<'a> {
    /// Format for human-readable logs in trusted debug contexts.
    ///
    /// Only available with BOTH the `trusted_debug` feature flag AND debug
    /// assertions enabled. Unlike [`write_to`](Self::write_to), fields are
    /// not truncated.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = format!(
            "[{}] {} message='{}' at={}",
            self.code.value(),
            self.severity,
            self.message,
            self.location
        );

        if let Some(mongo) = self.mongo {
            output.push_str(&format!(" mongo='{}'", mongo));
        }

        for (key, value) in self.metadata {
            output.push_str(&format!(" {}='{}'", key, value.as_str()));
        }

        output
    }

    /// Write structured log data to a formatter without allocating.
    ///
    /// Format:
    /// `[SQLSTATE/CodeName] SEVERITY message='..' detail='..' hint='..' at=file:line key='value'`
    ///
    /// Example:
    /// ```rust
    /// # use helio_errors::mongo_error;
    /// let err = mongo_error!(BadValue, "field missing");
    /// err.with_internal_log(|log| {
    ///     let mut buffer = String::new();
    ///     log.write_to(&mut buffer).unwrap();
    ///     assert!(buffer.starts_with("[2000Y/BadValue] ERROR message='field missing'"));
    /// });
    /// ```
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self.mongo {
            Some(mongo) => write!(f, "[{}/{}]", self.code, mongo.name())?,
            None => write!(f, "[{}]", self.code)?,
        }

        write!(
            f,
            " {} message='{}'",
            self.severity,
            truncate_with_indicator(self.message)
        )?;

        if let Some(detail) = self.detail {
            write!(f, " detail='{}'", truncate_with_indicator(detail))?;
        }

        if let Some(hint) = self.hint {
            write!(f, " hint='{}'", truncate_with_indicator(hint))?;
        }

        write!(f, " at={}", self.location)?;

        for (key, value) in self.metadata {
            write!(f, " {}='{}'", key, truncate_with_indicator(value.as_str()))?;
        }

        Ok(())
    }

    /// Host error code.
    #[inline]
    pub const fn code(&self) -> HostErrorCode {
        self.code
    }

    /// Native Mongo code, when the record is a Mongo error.
    #[inline]
    pub fn native_code(&self) -> Option<NativeErrorCode> {
        crate::decode(self.code)
    }

    /// Registered Mongo name, when one exists for the code.
    #[inline]
    pub fn code_name(&self) -> Option<&'static str> {
        self.mongo.map(MongoError::name)
    }

    #[inline]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    #[inline]
    pub const fn detail(&self) -> Option<&str> {
        self.detail
    }

    #[inline]
    pub const fn hint(&self) -> Option<&str> {
        self.hint
    }

    #[inline]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    #[inline]
    pub const fn metadata(&self) -> &[(&'static str, ContextField)] {
        self.metadata
    }
}

impl ErrorRecord {
    /// Create a structured log entry that borrows from this record.
    #[inline]
    pub fn internal_log(&self) -> RecordLog<'_> {
        RecordLog {
            code: self.code,
            mongo: self.mongo_error(),
            severity: self.severity,
            message: &self.message,
            detail: self.detail.as_deref(),
            hint: self.hint.as_deref(),
            location: self.location,
            metadata: &self.metadata,
        }
    }

    /// Callback-style logging; the entry is destroyed when `f` returns.
    #[inline]
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RecordLog<'_>) -> R,
    {
        let log = self.internal_log();
        f(&log)
    }
}

/// Truncate a string for display.
///
/// If the string exceeds MAX_FIELD_OUTPUT_LEN, it's truncated at a char
/// boundary with an indicator appended.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mongo, sqlstate, RelayExt};

    #[test]
    fn truncate_ascii() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN + 10);
        let truncated = truncate_with_indicator(&s);
        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn no_truncate_when_under_limit() {
        let s = "short string";
        let truncated = truncate_with_indicator(s);
        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated, s);
    }

    #[test]
    fn truncate_utf8_boundary() {
        let s = "й".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);
        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);
        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert!(!truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn context_field_zeroizes_owned() {
        let mut field = ContextField::from(String::from("sensitive"));
        field.zeroize();
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn context_field_doesnt_zeroize_borrowed() {
        let mut field = ContextField::from("static");
        field.zeroize();
        assert_eq!(field.as_str(), "static");
    }

    #[test]
    fn mongo_record_log_line() {
        let err = ErrorRecord::mongo(&mongo::BadValue, "field missing")
            .with_hint("check the field name")
            .with_metadata("collection", "orders");

        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();

        assert!(buffer.starts_with("[2000Y/BadValue] ERROR message='field missing'"));
        assert!(buffer.contains(" hint='check the field name'"));
        assert!(!buffer.contains(" detail="));
        assert!(buffer.contains(" at="));
        assert!(buffer.ends_with(" collection='orders'"));
    }

    #[test]
    fn foreign_record_log_has_no_name() {
        let err = ErrorRecord::new(sqlstate::DIVISION_BY_ZERO, "division by zero");
        err.with_internal_log(|log| {
            assert_eq!(log.code_name(), None);
            assert_eq!(log.native_code(), None);
            let mut buffer = String::new();
            log.write_to(&mut buffer).unwrap();
            assert!(buffer.starts_with("[22012] ERROR message='division by zero'"));
        });
    }

    #[test]
    fn log_reflects_relayed_message() {
        let result: crate::Result<()> =
            Err(ErrorRecord::mongo(&mongo::TypeMismatch, "expected array"));
        let err = result.relay_prefix("$size: ").unwrap_err();
        let log = err.internal_log();
        assert_eq!(log.message(), "$size: expected array");
        assert_eq!(log.native_code(), Some(mongo::TypeMismatch.native()));
    }

    #[test]
    fn oversized_message_is_truncated_in_output() {
        let err = ErrorRecord::mongo(&mongo::BadValue, "x".repeat(10_000));
        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();
        assert!(buffer.contains(TRUNCATION_INDICATOR));
        assert!(buffer.len() < 2 * MAX_FIELD_OUTPUT_LEN);
        assert_eq!(err.message().len(), 10_000);
    }
}
