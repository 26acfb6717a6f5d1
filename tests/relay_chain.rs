//! Relays across layered call chains, Result-threaded and unwinding.

use helio_errors::host::{relay_active_error, ErrorHost, ThreadHost};
use helio_errors::{
    mongo, mongo_error, raise_mongo_error, sqlstate, ErrorRecord, RelayExt, Result, Severity,
};

// ============================================================================
// Result-threaded pipeline
// ============================================================================

fn parse_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(mongo_error!(PathNotViable, "empty path"));
    }
    if path.starts_with('$') {
        return Err(
            mongo_error!(FailedToParse, "field name '{}' may not start with '$'", path)
                .with_hint("use $getField for dollar-prefixed names"),
        );
    }
    Ok(path.split('.').collect())
}

fn divide(lhs: i64, rhs: i64) -> Result<i64> {
    lhs.checked_div(rhs)
        .ok_or_else(|| ErrorRecord::new(sqlstate::DIVISION_BY_ZERO, "division by zero"))
}

fn evaluate(path: &str, lhs: i64, rhs: i64) -> Result<i64> {
    let segments = parse_path(path).relay_prefix_with(|| format!("while parsing '{}': ", path))?;
    let value = divide(lhs, rhs).relay_prefix("$divide: ")?;
    Ok(value * segments.len() as i64)
}

fn run_command(path: &str, lhs: i64, rhs: i64) -> Result<i64> {
    evaluate(path, lhs, rhs).relay_prefix("aggregate: ")
}

#[test]
fn successful_pipeline_is_untouched() {
    assert_eq!(run_command("a.b", 10, 5).unwrap(), 4);
}

#[test]
fn mongo_error_collects_every_layer() {
    let err = run_command("$bad", 1, 1).unwrap_err();

    assert_eq!(err.code(), mongo::FailedToParse.host());
    assert_eq!(
        err.message(),
        "aggregate: while parsing '$bad': field name '$bad' may not start with '$'"
    );
    assert_eq!(err.hint(), Some("use $getField for dollar-prefixed names"));
    assert_eq!(err.mongo_error().map(|entry| entry.name()), Some("FailedToParse"));
}

#[test]
fn foreign_error_crosses_every_layer_unchanged() {
    let err = run_command("a", 1, 0).unwrap_err();

    assert_eq!(err.code(), sqlstate::DIVISION_BY_ZERO);
    assert_eq!(err.message(), "division by zero");
    assert_eq!(err.sqlstate().as_str(), "22012");
}

#[test]
fn relayed_record_logs_final_message() {
    let err = run_command("", 1, 1).unwrap_err();

    let mut line = String::new();
    err.internal_log().write_to(&mut line).unwrap();
    assert!(line.contains("/PathNotViable] ERROR message='aggregate: while parsing '': empty path'"));
}

// ============================================================================
// Unwinding pipeline
// ============================================================================

fn unwinding_parse(path: &str) -> usize {
    if path.is_empty() {
        raise_mongo_error!(PathNotViable, "empty path");
    }
    path.split('.').count()
}

fn unwinding_evaluate(path: &str) -> usize {
    ThreadHost::try_catch(
        || unwinding_parse(path),
        || relay_active_error(&ThreadHost, &format!("while parsing '{}': ", path)),
    )
}

fn unwinding_command(path: &str) -> usize {
    ThreadHost::try_catch(
        || unwinding_evaluate(path),
        || relay_active_error(&ThreadHost, "aggregate: "),
    )
}

#[test]
fn unwinding_pipeline_matches_result_pipeline() {
    assert_eq!(ThreadHost::catch_raised(|| unwinding_command("a.b.c")).unwrap(), 3);

    let unwound = ThreadHost::catch_raised(|| unwinding_command("")).unwrap_err();
    let returned = run_command("", 1, 1).unwrap_err();

    assert_eq!(unwound.code(), returned.code());
    assert_eq!(unwound.message(), returned.message());
    assert!(!ThreadHost::has_active_error());
}

#[test]
fn handler_may_recover_instead_of_relaying() {
    let recovered = ThreadHost::try_catch(
        || unwinding_parse(""),
        || match ThreadHost.capture_and_clear() {
            Some(err) if err.code() == mongo::PathNotViable.host() => 0,
            Some(err) => ThreadHost.raise(err),
            None => unreachable!("handler runs only with an active error"),
        },
    );
    assert_eq!(recovered, 0);
}

/// Host with its own capture slot that tags what it raises.
struct RecordingHost {
    active: std::cell::RefCell<Option<ErrorRecord>>,
}

impl ErrorHost for RecordingHost {
    fn capture_and_clear(&self) -> Option<ErrorRecord> {
        self.active.borrow_mut().take()
    }

    fn raise(&self, record: ErrorRecord) -> ! {
        ThreadHost.raise(record.with_metadata("host", "recording"))
    }
}

#[test]
fn relay_works_against_any_host() {
    let host = RecordingHost {
        active: std::cell::RefCell::new(Some(
            ErrorRecord::mongo(&mongo::Overflow, "too big").with_severity(Severity::Fatal),
        )),
    };

    let err = ThreadHost::catch_raised(|| -> () { relay_active_error(&host, "$add: ") }).unwrap_err();
    assert_eq!(err.message(), "$add: too big");
    assert_eq!(err.severity(), Severity::Fatal);
    assert_eq!(err.metadata()[0].1.as_str(), "recording");
    assert!(host.active.borrow().is_none());
}
