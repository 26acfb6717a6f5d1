#![no_main]

use helio_errors::{mongo, ErrorRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();

    let err = ErrorRecord::mongo(&mongo::BadValue, text.clone())
        .with_detail(text.clone())
        .with_hint(text.clone())
        .with_metadata("input", text);

    let mut buffer = String::new();
    err.internal_log().write_to(&mut buffer).unwrap();

    // Four fields, each capped at 1024 bytes, plus fixed formatting.
    assert!(buffer.len() < 4 * 1024 + 512);
});
