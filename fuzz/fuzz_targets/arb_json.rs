#![no_main]

use arbi_core::ArbData;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut arb = ArbData::new();
    if arb.set_json_str(text).is_err() {
        assert_eq!(arb.json_str(), "{}");
        return;
    }

    let out = arb.json_str();
    let reparsed: serde_json::Value = serde_json::from_str(&out).expect("output reparses");
    assert_eq!(&reparsed, arb.json());
});
