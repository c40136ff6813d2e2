//! Fuzz target for pattern compilation and input masking.
//!
//! Tests that arbitrary patterns, values and selections never panic and that
//! selections always stay inside the value.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_input::{DeletionKey, Formatter, Selection};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: &'a str,
    value: &'a str,
    start: u8,
    end: u8,
    backspace: bool,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(formatter) = Formatter::new(input.pattern) else {
        return;
    };
    let selection = Selection::new(input.start as usize, input.end as usize);

    let out = formatter.format(input.value, selection);
    assert!(out.selection.end <= out.value.chars().count());

    let raw = formatter.unformat(&out.value, out.selection);
    assert!(raw.selection.end <= raw.value.chars().count());

    let key = if input.backspace {
        DeletionKey::Backspace
    } else {
        DeletionKey::Delete
    };
    let deleted = formatter.simulate_deletion(key, &out.value, out.selection);
    assert!(deleted.selection.end <= deleted.value.chars().count());
    let _ = formatter.format(&deleted.value, deleted.selection);
});
