#![no_main]

//! Fuzz target for the buffer transforms.
//!
//! Each transform must be total over arbitrary buffers and parameters, and
//! must only return rewritten contents together with an applied outcome.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    contents: String,
    block: String,
    anchor: String,
    field: String,
}

fuzz_target!(|input: Input| {
    let outcomes = [
        declfix_edit::replace_anchored(&input.contents, &input.anchor, &input.field, None),
        declfix_edit::insert_field(&input.contents, &input.block, &input.anchor, &input.field),
        declfix_edit::toggle_optional(&input.contents, &input.block, &input.anchor),
    ];

    for edit in outcomes {
        assert_eq!(edit.outcome.is_applied(), edit.new_contents.is_some());
    }
});
