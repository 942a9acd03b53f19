#![no_main]

//! Fuzz target for the block locator.
//!
//! Arbitrary text must never panic the scanner, and any span it returns must
//! stay inside the buffer and start at a brace.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    for name in ["A", "Foo", "QuantumState"] {
        if let Some(span) = declfix_scan::locate_block(s, name) {
            assert!(span.start <= span.end);
            assert!(span.end <= s.len());
            assert!(span.slice(s).starts_with('{'));
        }
        let _ = declfix_scan::block_text(s, name);
    }
});
