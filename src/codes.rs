//! Error code space - Mongo native codes embedded in host SQLSTATE codes.
//!
//! The host reports errors with a 32-bit code that packs a five-character
//! SQLSTATE, six bits per character. Mongo errors live in a reserved window
//! of that space whose last SQLSTATE character is `Y`:
//!
//! ```text
//! RANGE_BASE = make_sqlstate("0000Y")          = 687_865_856
//! RANGE_END  = RANGE_BASE + 2^23 - 1           = 696_254_463
//! encode(n)  = RANGE_BASE + n                  (0 <= n < 2^23)
//! ```
//!
//! Because every native code fits in 23 bits, encoding never carries into
//! the fifth character, so an encoded code still unpacks into a printable
//! SQLSTATE (`BadValue` = native 2 = `2000Y`).
//!
//! # Governance
//!
//! - `NativeErrorCode::new` and `MongoError::const_new` assert their range.
//!   Used in `const` items, a violation fails the build.
//! - `checked_new` variants return [`CodeViolation`] for runtime sources.
//! - Nothing in this module wraps, truncates, or saturates a code.
//!
//! # Example
//!
//! ```rust
//! use helio_errors::{encode, is_in_range, decode, NativeErrorCode, RANGE_BASE};
//!
//! const BAD_VALUE: NativeErrorCode = NativeErrorCode::new(2);
//!
//! let host = encode(BAD_VALUE);
//! assert_eq!(host.value(), RANGE_BASE.value() + 2);
//! assert!(is_in_range(host));
//! assert_eq!(decode(host), Some(BAD_VALUE));
//! assert_eq!(host.sqlstate().as_str(), "2000Y");
//! ```
//!
//! ```rust,compile_fail
//! use helio_errors::MongoError;
//!
//! // 2^23 does not fit the reserved window: const evaluation fails.
//! const TOO_BIG: MongoError = MongoError::const_new("TooBig", 8_388_608);
//! assert_eq!(TOO_BIG.name(), "TooBig");
//! ```

use std::fmt;

// ============================================================================
// Window Constants
// ============================================================================

/// Width of the native Mongo code space in bits.
pub const NATIVE_CODE_BITS: u32 = 23;

/// Largest native code that can be embedded (2^23 - 1).
pub const NATIVE_CODE_MAX: u32 = (1 << NATIVE_CODE_BITS) - 1;

/// First host code of the reserved Mongo window (SQLSTATE `0000Y`).
pub const RANGE_BASE: HostErrorCode = make_sqlstate(*b"0000Y");

/// Last host code of the reserved Mongo window, inclusive.
pub const RANGE_END: HostErrorCode = HostErrorCode(RANGE_BASE.0 + NATIVE_CODE_MAX as i32);

// The window is exactly 2^23 wide and never reaches into the fifth SQLSTATE character.
const _: () = assert!(RANGE_END.0 - RANGE_BASE.0 + 1 == 1 << NATIVE_CODE_BITS);
const _: () = assert!(RANGE_END.0 >> 24 == RANGE_BASE.0 >> 24);

// ============================================================================
// SQLSTATE Packing
// ============================================================================

#[inline]
const fn sixbit(ch: u8) -> i32 {
    (ch.wrapping_sub(b'0') & 0x3F) as i32
}

/// Pack five SQLSTATE characters into a host error code.
///
/// Mirrors the host's own packing, so `make_sqlstate(*b"XX000")` is the
/// host's internal-error code.
#[inline]
pub const fn make_sqlstate(chars: [u8; 5]) -> HostErrorCode {
    HostErrorCode(
        sixbit(chars[0])
            + (sixbit(chars[1]) << 6)
            + (sixbit(chars[2]) << 12)
            + (sixbit(chars[3]) << 18)
            + (sixbit(chars[4]) << 24),
    )
}

/// Well-known host codes outside the Mongo window.
pub mod sqlstate {
    use super::{make_sqlstate, HostErrorCode};

    /// `00000`
    pub const SUCCESSFUL_COMPLETION: HostErrorCode = make_sqlstate(*b"00000");
    /// `22012`
    pub const DIVISION_BY_ZERO: HostErrorCode = make_sqlstate(*b"22012");
    /// `22023`
    pub const INVALID_PARAMETER_VALUE: HostErrorCode = make_sqlstate(*b"22023");
    /// `XX000` - raised by the relay itself on contract violations.
    pub const INTERNAL_ERROR: HostErrorCode = make_sqlstate(*b"XX000");
}

/// Five-character SQLSTATE unpacked from a host code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlState([u8; 5]);

impl SqlState {
    /// Borrow the SQLSTATE as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Every unpacked byte is in '0'..='o', always ASCII.
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }

    /// Raw SQLSTATE bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 5] {
        &self.0
    }
}

impl fmt::Display for SqlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Native and Host Codes
// ============================================================================

/// Numeric error code defined by the Mongo wire protocol (0..2^23).
///
/// Construction validates the 23-bit range; a value held by this type is
/// always embeddable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeErrorCode(u32);

impl NativeErrorCode {
    /// Create a native code, panicking (at compile time in const contexts)
    /// if it exceeds [`NATIVE_CODE_MAX`].
    #[inline]
    pub const fn new(value: u32) -> Self {
        assert!(value <= NATIVE_CODE_MAX, "invalid mongo error code");
        Self(value)
    }

    /// Create a native code from a runtime value.
    ///
    /// # Errors
    ///
    /// Returns [`CodeViolation::NativeOutOfRange`] if `value` exceeds 23 bits.
    #[inline]
    pub fn checked_new(value: u32) -> Result<Self, CodeViolation> {
        if value > NATIVE_CODE_MAX {
            Err(CodeViolation::NativeOutOfRange { value })
        } else {
            Ok(Self(value))
        }
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Host code for this native code.
    #[inline]
    pub const fn encode(self) -> HostErrorCode {
        encode(self)
    }
}

impl fmt::Display for NativeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error code understood by the host's reporting machinery.
///
/// Any `i32` is a valid host code; only codes inside
/// [`RANGE_BASE`]..=[`RANGE_END`] belong to the Mongo taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostErrorCode(i32);

impl HostErrorCode {
    /// Wrap a raw host code.
    #[inline]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Unpack into the five-character SQLSTATE.
    pub const fn sqlstate(self) -> SqlState {
        let mut chars = [0u8; 5];
        let mut i = 0;
        while i < 5 {
            chars[i] = ((self.0 >> (6 * i)) & 0x3F) as u8 + b'0';
            i += 1;
        }
        SqlState(chars)
    }

    /// Whether this code was produced by [`encode`].
    #[inline]
    pub const fn is_mongo_error(self) -> bool {
        is_in_range(self)
    }
}

impl fmt::Display for HostErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sqlstate())
    }
}

impl From<NativeErrorCode> for HostErrorCode {
    #[inline]
    fn from(native: NativeErrorCode) -> Self {
        encode(native)
    }
}

/// Embed a native code into the reserved host window.
#[inline]
pub const fn encode(native: NativeErrorCode) -> HostErrorCode {
    HostErrorCode(RANGE_BASE.0 + native.0 as i32)
}

/// Whether a host code lies in the reserved Mongo window.
///
/// This is the only authority for "is this error one of ours".
#[inline]
pub const fn is_in_range(host: HostErrorCode) -> bool {
    host.0 >= RANGE_BASE.0 && host.0 <= RANGE_END.0
}

/// Recover the native code from an in-range host code.
#[inline]
pub const fn decode(host: HostErrorCode) -> Option<NativeErrorCode> {
    if is_in_range(host) {
        Some(NativeErrorCode((host.0 - RANGE_BASE.0) as u32))
    } else {
        None
    }
}

// ============================================================================
// Violations
// ============================================================================

/// Registration or construction violation with full detail.
///
/// For messages crossing a client boundary, use [`CodeViolation::to_public`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeViolation {
    /// Native value does not fit in 23 bits.
    NativeOutOfRange { value: u32 },
    /// Encoded value escaped the reserved window.
    HostOutOfRange { name: &'static str, host: i32 },
    /// Entry registered with an empty name.
    EmptyName,
    /// Two entries registered under the same name.
    DuplicateName { name: &'static str },
    /// Two names share a native value (only with `strict_registry`).
    SharedValue {
        value: u32,
        first: &'static str,
        second: &'static str,
    },
}

impl CodeViolation {
    /// Generic message that does not reveal registry contents.
    pub fn to_public(&self) -> &'static str {
        match self {
            Self::NativeOutOfRange { .. } | Self::HostOutOfRange { .. } => {
                "Invalid error code"
            }
            Self::EmptyName | Self::DuplicateName { .. } | Self::SharedValue { .. } => {
                "Invalid error registration"
            }
        }
    }
}

impl fmt::Display for CodeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeOutOfRange { value } => {
                write!(
                    f,
                    "Native error code {} is out of range (must be 0-{})",
                    value, NATIVE_CODE_MAX
                )
            }
            Self::HostOutOfRange { name, host } => {
                write!(
                    f,
                    "Host error code {} for {} is outside the reserved window {}-{}",
                    host, name, RANGE_BASE.0, RANGE_END.0
                )
            }
            Self::EmptyName => write!(f, "Error registered without a name"),
            Self::DuplicateName { name } => write!(f, "Error name {} registered twice", name),
            Self::SharedValue {
                value,
                first,
                second,
            } => {
                write!(
                    f,
                    "Native error code {} shared by {} and {}",
                    value, first, second
                )
            }
        }
    }
}

impl std::error::Error for CodeViolation {}

// ============================================================================
// Mongo Error (Registered Identity)
// ============================================================================

/// A registered Mongo error: symbolic name, native code, precomputed host code.
///
/// Instances are defined once as constants by
/// [`define_mongo_errors!`](crate::define_mongo_errors); the host code is
/// computed during const evaluation, never per call.
///
/// # No-Copy/No-Clone Semantics
///
/// Like other identity types in this crate, a `MongoError` is used by
/// reference. Callers raise with `&mongo::BadValue`, not a copy of it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MongoError {
    name: &'static str,
    native: NativeErrorCode,
    host: HostErrorCode,
}

impl MongoError {
    /// Create a registered error with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics if the name is empty, the native code exceeds 23 bits, or the
    /// encoded code falls outside the window. In const contexts this is a
    /// build failure.
    #[inline]
    pub const fn const_new(name: &'static str, native: u32) -> Self {
        assert!(!name.is_empty(), "mongo error name must not be empty");
        let native = NativeErrorCode::new(native);
        let host = encode(native);
        assert!(is_in_range(host), "invalid mongo error code");
        Self { name, native, host }
    }

    /// Create a registered error with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodeViolation`] found; never panics.
    pub fn checked_new(name: &'static str, native: u32) -> Result<Self, CodeViolation> {
        if name.is_empty() {
            return Err(CodeViolation::EmptyName);
        }
        let native = NativeErrorCode::checked_new(native)?;
        let host = encode(native);
        if !is_in_range(host) {
            return Err(CodeViolation::HostOutOfRange {
                name,
                host: host.value(),
            });
        }
        Ok(Self { name, native, host })
    }

    /// Symbolic name as defined by the Mongo protocol.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Native Mongo code.
    #[inline]
    pub const fn native(&self) -> NativeErrorCode {
        self.native
    }

    /// Precomputed host code.
    #[inline]
    pub const fn host(&self) -> HostErrorCode {
        self.host
    }

    /// SQLSTATE of the host code.
    #[inline]
    pub const fn sqlstate(&self) -> SqlState {
        self.host.sqlstate()
    }
}

impl fmt::Display for MongoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.native)
    }
}

// ============================================================================
// Tests
// ============================================================================
