//! Host metadata carried by an [`ErrorRecord`](crate::ErrorRecord).
//!
//! None of these fields take part in classification. A relay reads the
//! code and rewrites the message; everything here passes through as-is.

use std::fmt;
use std::panic::Location;

// ============================================================================
// Severity
// ============================================================================

/// Reporting severity of a raised error.
///
/// Only levels that abort the current unit of work are modelled; notices
/// and warnings never travel through a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Aborts the current statement or transaction.
    Error,
    /// Aborts the current session.
    Fatal,
    /// Aborts every session.
    Panic,
}

impl Severity {
    /// Host label for this severity.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Source Location
// ============================================================================

/// Source position where a record was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
    column: u32,
}

impl SourceLocation {
    /// Location of the caller, through any `#[track_caller]` frames.
    #[inline]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Source file path.
    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column.
    #[inline]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Error.to_string(), "ERROR");
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
        assert!(Severity::Panic > Severity::Error);
    }

    #[test]
    fn caller_location_points_here() {
        let line = line!() + 1;
        let location = SourceLocation::caller();
        assert_eq!(location.line(), line);
        assert!(location.file().ends_with("models.rs"));
        assert!(location.to_string().ends_with(&format!(":{}", line)));
    }
}
