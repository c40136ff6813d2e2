//! Input masking example.
//!
//! Run with: `cargo run --example masking`

use card_input::format::{card_number_pattern, strip_formatting};
use card_input::{
    add_gaps_to_card_number, detect_card_type, DeletionKey, Formatter, PatternError, Selection,
};

/// Renders a value with the selection marked: `|` for a caret, `[..]` for a range.
fn show(value: &str, selection: Selection) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i == selection.start {
            out.push(if selection.is_collapsed() { '|' } else { '[' });
        }
        if i == selection.end && !selection.is_collapsed() {
            out.push(']');
        }
        out.push(*c);
    }
    if selection.start == chars.len() {
        out.push(if selection.is_collapsed() { '|' } else { '[' });
    }
    if selection.end == chars.len() && !selection.is_collapsed() {
        out.push(']');
    }
    out
}

fn main() -> Result<(), PatternError> {
    println!("=== Input Masking ===\n");

    // -------------------------------------------------------------------------
    // Card number mask that follows the detected brand
    // -------------------------------------------------------------------------
    println!("--- Card number as typed ---\n");

    let mut formatter = Formatter::new(&card_number_pattern(None))?;
    let mut typed = String::new();
    for digit in "378282246310005".chars() {
        typed.push(digit);
        let brand = detect_card_type(&typed);
        formatter.set_pattern(&card_number_pattern(brand.first()))?;
        let out = formatter.format(&typed, Selection::caret(typed.len()));
        println!("  {:<16} -> {}", typed, show(&out.value, out.selection));
    }
    println!();

    // -------------------------------------------------------------------------
    // Editing in the middle keeps the caret next to the edited digit
    // -------------------------------------------------------------------------
    println!("--- Mid-value edits ---\n");

    let formatter = Formatter::new(&card_number_pattern(None))?;
    let current = formatter.format("41111111", Selection::caret(8));
    println!("  start:         {}", show(&current.value, current.selection));

    // Type a 9 after the third digit of the unformatted value
    let raw = formatter.unformat(&current.value, Selection::caret(3));
    let mut edited = raw.value.clone();
    edited.insert(raw.selection.start, '9');
    let out = formatter.format(&edited, Selection::caret(raw.selection.start + 1));
    println!("  insert 9 at 3: {}", show(&out.value, out.selection));

    // Backspace right after the space
    let deleted = formatter.simulate_deletion(DeletionKey::Backspace, &out.value, Selection::caret(5));
    let out = formatter.format(&deleted.value, deleted.selection);
    println!("  backspace @5:  {}", show(&out.value, out.selection));

    // Delete a selected range
    let deleted = formatter.simulate_deletion(DeletionKey::Delete, &out.value, Selection::new(2, 7));
    let out = formatter.format(&deleted.value, deleted.selection);
    println!("  delete 2..7:   {}", show(&out.value, out.selection));
    println!();

    // -------------------------------------------------------------------------
    // Other masks
    // -------------------------------------------------------------------------
    println!("--- Other masks ---\n");

    let masks = [
        ("{{99}}/{{99}}", "1230"),
        ("({{999}}) {{999}}-{{9999}}", "5551234567"),
        ("{{AAA}}-{{999}}", "abc123"),
        ("{{**}} {{**}}", "a1b2"),
    ];
    for (pattern, value) in masks {
        let formatter = Formatter::new(pattern)?;
        let out = formatter.format(value, Selection::caret(value.len()));
        println!("  {:<28} {:<12} -> {}", pattern, value, out.value);
    }
    println!();

    // -------------------------------------------------------------------------
    // Gaps without a mask
    // -------------------------------------------------------------------------
    println!("--- Gaps ---\n");
    for number in ["4111111111111111", "3782-822463-10005", "30569309025904"] {
        let spaced = add_gaps_to_card_number(number, None);
        println!("  {:<20} -> {:<22} ({})", number, spaced, strip_formatting(&spaced));
    }
    println!();

    // -------------------------------------------------------------------------
    // Bad patterns are reported, not panicked on
    // -------------------------------------------------------------------------
    match Formatter::new("{{99}} {{9-9}}") {
        Ok(_) => println!("  unexpected: pattern accepted"),
        Err(e) => println!("  Error: {}", e),
    }

    Ok(())
}
