#![no_main]

use helio_errors::{is_in_range, ErrorRecord, HostErrorCode, RelayExt, Result};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let code = HostErrorCode::from_raw(i32::from_le_bytes([data[0], data[1], data[2], data[3]]));
    let text = String::from_utf8_lossy(&data[4..]);
    let split = text.len() / 2;
    let split = (0..=split).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
    let (prefix, message) = text.split_at(split);

    let result: Result<()> = Err(ErrorRecord::new(code, message.to_owned()));
    let err = result.relay_prefix(prefix).unwrap_err();

    assert_eq!(err.code(), code);
    if is_in_range(code) {
        assert_eq!(err.message().len(), prefix.len() + message.len());
        assert!(err.message().starts_with(prefix));
        assert!(err.message().ends_with(message));
    } else {
        assert_eq!(err.message(), message);
    }
});
