#![no_main]

use arbi_core::{validate_identifier, ArbCmd};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let expected = !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    assert_eq!(validate_identifier(s).is_ok(), expected);
    assert_eq!(ArbCmd::new(s, "op").is_ok(), expected);
});
