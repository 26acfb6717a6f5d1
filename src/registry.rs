//! Registry of Mongo errors - startup validation and lookup.
//!
//! The table in [`definitions`](crate::definitions) is already checked
//! during const evaluation. [`validate_builtin`] walks it once more at
//! startup so a host can refuse to start if the table it links against is
//! not the one it expects, and reports which native codes are shared by
//! more than one name.
//!
//! # Example
//!
//! ```rust
//! use helio_errors::{registry, mongo};
//!
//! let report = registry::validate_builtin().expect("mongo error table is valid");
//! assert_eq!(report.entry_count(), registry::builtin().len());
//!
//! let entry = registry::builtin().by_name("BadValue").unwrap();
//! assert_eq!(entry.host(), mongo::BadValue.host());
//! ```

use crate::{definitions, is_in_range, CodeViolation, HostErrorCode, MongoError, NativeErrorCode};
use smallvec::SmallVec;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// A native code registered under more than one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedValue {
    /// The shared native code.
    pub value: NativeErrorCode,
    /// Name declared first.
    pub first: &'static str,
    /// A later name reusing the value.
    pub also: &'static str,
}

/// Outcome of a successful [`Registry::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryReport {
    entry_count: usize,
    distinct_values: usize,
    shared: SmallVec<[SharedValue; 4]>,
}

impl RegistryReport {
    /// Number of registered names.
    #[inline]
    pub const fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Number of distinct native codes.
    #[inline]
    pub const fn distinct_values(&self) -> usize {
        self.distinct_values
    }

    /// Native codes registered under several names, in declaration order.
    #[inline]
    pub fn shared_values(&self) -> &[SharedValue] {
        &self.shared
    }
}

/// Read-only view over a static table of Mongo errors.
///
/// Never mutated after construction, so a `&'static Registry` can be shared
/// across threads freely.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    entries: &'static [MongoError],
}

impl Registry {
    /// Wrap a static table.
    #[inline]
    pub const fn new(entries: &'static [MongoError]) -> Self {
        Self { entries }
    }

    /// Number of registered names.
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'static, MongoError> {
        self.entries.iter()
    }

    /// Check every entry against the window and the naming rules.
    ///
    /// # Errors
    ///
    /// - [`CodeViolation::HostOutOfRange`] if an encoded code escapes the window
    /// - [`CodeViolation::DuplicateName`] if a name appears twice
    /// - [`CodeViolation::SharedValue`] if two names share a native code and
    ///   the `strict_registry` feature is enabled
    pub fn validate(&self) -> Result<RegistryReport, CodeViolation> {
        let mut names: HashSet<&'static str> = HashSet::with_capacity(self.entries.len());
        let mut first_by_value: HashMap<NativeErrorCode, &'static str> =
            HashMap::with_capacity(self.entries.len());
        let mut shared = SmallVec::new();

        for entry in self.entries {
            if !is_in_range(entry.host()) {
                return Err(CodeViolation::HostOutOfRange {
                    name: entry.name(),
                    host: entry.host().value(),
                });
            }

            if !names.insert(entry.name()) {
                return Err(CodeViolation::DuplicateName { name: entry.name() });
            }

            match first_by_value.entry(entry.native()) {
                Entry::Vacant(slot) => {
                    slot.insert(entry.name());
                }
                Entry::Occupied(slot) => {
                    if cfg!(feature = "strict_registry") {
                        return Err(CodeViolation::SharedValue {
                            value: entry.native().value(),
                            first: slot.get(),
                            second: entry.name(),
                        });
                    }
                    shared.push(SharedValue {
                        value: entry.native(),
                        first: slot.get(),
                        also: entry.name(),
                    });
                }
            }
        }

        Ok(RegistryReport {
            entry_count: self.entries.len(),
            distinct_values: first_by_value.len(),
            shared,
        })
    }

    /// Find an entry by its Mongo name.
    pub fn by_name(&self, name: &str) -> Option<&'static MongoError> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// All entries registered under a native code.
    pub fn by_native(
        &self,
        native: NativeErrorCode,
    ) -> impl Iterator<Item = &'static MongoError> + 'static {
        let entries = self.entries;
        entries.iter().filter(move |entry| entry.native() == native)
    }

    /// All entries whose host code is `host`; empty for foreign codes.
    pub fn by_host_code(
        &self,
        host: HostErrorCode,
    ) -> impl Iterator<Item = &'static MongoError> + 'static {
        let entries: &'static [MongoError] = if is_in_range(host) { self.entries } else { &[] };
        entries.iter().filter(move |entry| entry.host() == host)
    }
}

impl IntoIterator for &Registry {
    type Item = &'static MongoError;
    type IntoIter = std::slice::Iter<'static, MongoError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Registry over the built-in Mongo error table.
pub fn builtin() -> &'static Registry {
    static BUILTIN: OnceLock<Registry> = OnceLock::new();
    BUILTIN.get_or_init(|| Registry::new(definitions::REGISTERED))
}

/// Validate the built-in table once per process.
///
/// Later calls return the memoized outcome. Hosts call this during startup
/// and refuse to start on `Err`.
///
/// # Errors
///
/// See [`Registry::validate`].
pub fn validate_builtin() -> Result<&'static RegistryReport, CodeViolation> {
    static OUTCOME: OnceLock<Result<RegistryReport, CodeViolation>> = OnceLock::new();
    OUTCOME.get_or_init(|| builtin().validate()).as_ref().map_err(Clone::clone)
}
