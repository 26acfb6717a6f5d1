//! Host error machinery for code that propagates errors by unwinding.
//!
//! The relay consumes two primitives from whatever owns the error state:
//! "take the error that was just caught" and "raise this error". They are
//! the [`ErrorHost`] trait. [`ThreadHost`] implements them in-process with
//! the try/catch/rethrow shape of a PostgreSQL backend:
//!
//! ```text
//! PG_TRY()                 ThreadHost::try_catch(
//! {   body   }                 || body,
//! PG_CATCH()                   || handler,   // active error parked here
//! {   handler  }           )
//! PG_END_TRY()
//! ```
//!
//! # Thread-local state
//!
//! The active error lives in a thread-local slot. A handler running on one
//! thread can never observe or clear an error caught on another.
//!
//! # Unwinding
//!
//! [`ThreadHost::raise`] unwinds with [`std::panic::resume_unwind`], so the
//! panic hook is not invoked and nothing is printed. Panics that are not
//! raised records pass through [`try_catch`](ThreadHost::try_catch) and
//! [`catch_raised`](ThreadHost::catch_raised) untouched. A raised record
//! that reaches the top of a thread terminates that thread like any other
//! unwind, so reporting boundaries wrap their work in `catch_raised`.

use crate::{relay_with_prefix, ErrorRecord};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

/// Capture and raise primitives of a host's error machinery.
pub trait ErrorHost {
    /// Take ownership of the error currently being handled, clearing it.
    ///
    /// `None` when no error is active.
    fn capture_and_clear(&self) -> Option<ErrorRecord>;

    /// Raise `record` as if freshly raised here. Never returns.
    fn raise(&self, record: ErrorRecord) -> !;
}

// Error being handled by the innermost running `try_catch` handler.
thread_local! {
    static ACTIVE_ERROR: RefCell<Option<ErrorRecord>> = const { RefCell::new(None) };
}

/// Unwind payload carrying a raised record.
struct Raised(ErrorRecord);

/// Restores the enclosing handler's active error when a handler exits,
/// normally or by unwinding.
struct ActiveErrorGuard {
    enclosing: Option<ErrorRecord>,
}

impl Drop for ActiveErrorGuard {
    fn drop(&mut self) {
        let enclosing = self.enclosing.take();
        let uncaptured = ACTIVE_ERROR.with(|slot| slot.replace(enclosing));
        drop(uncaptured);
    }
}

/// In-process host with thread-local error state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadHost;

impl ThreadHost {
    /// Run `body`; if it raises a record, run `handler` with that record
    /// as the active error.
    ///
    /// When `handler` returns or unwinds, whatever it did not capture is
    /// dropped and the enclosing handler's active error (if any) is
    /// restored.
    ///
    /// ```rust
    /// use helio_errors::host::{ErrorHost, ThreadHost};
    /// use helio_errors::{mongo, raise_mongo_error};
    ///
    /// let code = ThreadHost::try_catch(
    ///     || raise_mongo_error!(Overflow, "too big"),
    ///     || ThreadHost.capture_and_clear().map(|err| err.code()),
    /// );
    /// assert_eq!(code, Some(mongo::Overflow.host()));
    /// ```
    pub fn try_catch<T>(body: impl FnOnce() -> T, handler: impl FnOnce() -> T) -> T {
        match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(value) => value,
            Err(payload) => match payload.downcast::<Raised>() {
                Ok(raised) => {
                    let Raised(record) = *raised;
                    let enclosing = ACTIVE_ERROR.with(|slot| slot.replace(Some(record)));
                    let _guard = ActiveErrorGuard { enclosing };
                    handler()
                }
                Err(foreign) => panic::resume_unwind(foreign),
            },
        }
    }

    /// Run `body`, turning a raised record into `Err`.
    ///
    /// This is the reporting boundary: the record leaves the unwinding
    /// world here and can be logged or sent to a client.
    pub fn catch_raised<T>(body: impl FnOnce() -> T) -> Result<T, ErrorRecord> {
        match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Raised>() {
                Ok(raised) => {
                    let Raised(record) = *raised;
                    Err(record)
                }
                Err(foreign) => panic::resume_unwind(foreign),
            },
        }
    }

    /// Whether a handler on this thread currently has an active error.
    pub fn has_active_error() -> bool {
        ACTIVE_ERROR.with(|slot| slot.borrow().is_some())
    }
}

impl ErrorHost for ThreadHost {
    fn capture_and_clear(&self) -> Option<ErrorRecord> {
        ACTIVE_ERROR.with(RefCell::take)
    }

    fn raise(&self, record: ErrorRecord) -> ! {
        panic::resume_unwind(Box::new(Raised(record)))
    }
}

/// Capture the active error, prepend `prefix` if it is a Mongo error, and
/// raise it again.
///
/// Only meaningful inside a catch handler. With no active error the caller
/// broke that contract: a `Fatal` `XX000` record is raised instead.
///
/// ```rust
/// use helio_errors::host::{relay_active_error, ThreadHost};
/// use helio_errors::{raise_mongo_error, Severity};
///
/// let err = ThreadHost::catch_raised(|| -> () {
///     ThreadHost::try_catch(
///         || raise_mongo_error!(BadValue, "field missing"),
///         || relay_active_error(&ThreadHost, "parse error: "),
///     )
/// })
/// .unwrap_err();
/// assert_eq!(err.message(), "parse error: field missing");
/// assert_eq!(err.severity(), Severity::Error);
/// ```
#[track_caller]
pub fn relay_active_error<H: ErrorHost + ?Sized>(host: &H, prefix: &str) -> ! {
    match host.capture_and_clear() {
        Some(record) => host.raise(relay_with_prefix(record, prefix)),
        None => host.raise(ErrorRecord::internal_fatal(
            "error relay invoked with no active error",
        )),
    }
}
