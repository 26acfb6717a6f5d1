//! Convenience macros for declaring and raising Mongo errors.
//!
//! # Usage
//!
//! ```rust
//! # use helio_errors::{mongo_error, mongo};
//! let field = "$inc";
//! let err = mongo_error!(BadValue, "unknown modifier: {}", field);
//! assert_eq!(err.code(), mongo::BadValue.host());
//! assert_eq!(err.message(), "unknown modifier: $inc");
//! ```
//!
//! Names passed to [`mongo_error!`] resolve against the registered table at
//! compile time, so a misspelled name does not compile:
//!
//! ```rust,compile_fail
//! # use helio_errors::mongo_error;
//! let err = mongo_error!(BadVaule, "typo");
//! ```

// ============================================================================
// Table Declaration
// ============================================================================

/// Declare a table of Mongo errors.
///
/// Each `Name = code` entry expands to a public [`MongoError`](crate::MongoError)
/// constant whose host code is computed (and range-checked) during const
/// evaluation. The table is also listed, in declaration order, in a
/// `REGISTERED` static slice.
///
/// # Example
///
/// ```rust
/// mod table {
///     helio_errors::define_mongo_errors! {
///         BadValue = 2,
///         /// Legacy assertion site.
///         Location16020 = 16020,
///     }
/// }
///
/// assert_eq!(table::REGISTERED.len(), 2);
/// assert_eq!(table::Location16020.name(), "Location16020");
/// ```
///
/// An entry outside the 23-bit native space fails the build:
///
/// ```rust,compile_fail
/// helio_errors::define_mongo_errors! {
///     Overflowing = 8388608,
/// }
/// ```
#[macro_export]
macro_rules! define_mongo_errors {
    ( $( $(#[$meta:meta])* $name:ident = $code:expr ),+ $(,)? ) => {
        $(
            $(#[$meta])*
            #[doc = concat!("Mongo error `", stringify!($name), "`, native code ", stringify!($code), ".")]
            #[allow(non_upper_case_globals)]
            pub const $name: $crate::MongoError =
                $crate::MongoError::const_new(stringify!($name), $code);
        )+

        /// Every entry of this table, in declaration order.
        pub static REGISTERED: &[$crate::MongoError] = &[ $( $name ),+ ];
    };
}

// ============================================================================
// Error Creation Macros
// ============================================================================

/// Build an [`ErrorRecord`](crate::ErrorRecord) for a registered Mongo error.
///
/// The first argument is a name from [`mongo`](crate::mongo); the rest is a
/// `format!` argument list. The record's location is the macro call site.
///
/// # Example
///
/// ```rust
/// # use helio_errors::{mongo_error, Severity};
/// let err = mongo_error!(TypeMismatch, "$size requires an array");
/// assert!(err.is_mongo_error());
/// assert_eq!(err.severity(), Severity::Error);
/// ```
#[macro_export]
macro_rules! mongo_error {
    ($name:ident, $($arg:tt)+) => {
        $crate::ErrorRecord::mongo(&$crate::mongo::$name, format!($($arg)+))
    };
}

/// Build a registered Mongo error and raise it through the thread host.
///
/// Never returns; see [`ThreadHost`](crate::host::ThreadHost).
///
/// # Example
///
/// ```rust
/// # use helio_errors::{raise_mongo_error, mongo, host::ThreadHost};
/// let caught = ThreadHost::catch_raised(|| -> () {
///     raise_mongo_error!(FailedToParse, "unexpected token at {}", 7)
/// });
/// let err = caught.unwrap_err();
/// assert_eq!(err.code(), mongo::FailedToParse.host());
/// ```
#[macro_export]
macro_rules! raise_mongo_error {
    ($name:ident, $($arg:tt)+) => {
        $crate::host::ErrorHost::raise(
            &$crate::host::ThreadHost,
            $crate::mongo_error!($name, $($arg)+),
        )
    };
}

// ============================================================================
// Tests
// ============================================================================
