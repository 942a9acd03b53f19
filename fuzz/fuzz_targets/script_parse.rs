#![no_main]

//! Fuzz target for patch-script JSON parsing.
//!
//! Malformed script input must fail cleanly, never panic.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let _ = serde_json::from_str::<declfix_types::script::PatchScript>(s);
    let _ = serde_json::from_str::<declfix_types::ops::PatchOp>(s);
    let _ = serde_json::from_str::<declfix_types::outcome::Outcome>(s);

    if let Ok(val) = serde_json::from_str::<serde_json::Value>(s) {
        let _ = serde_json::from_value::<declfix_types::script::PatchScript>(val);
    }
});
