//! Fuzz target for the canonical formatter.
//!
//! Builds output blocks from structured input so most cases get past the
//! parser. Formatting must never panic, and formatting twice must give the
//! same text as formatting once.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_formatter
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct OutputBlock {
    name: String,
    /// Attribute lines placed inside the block, e.g. `value = 1`.
    lines: Vec<String>,
    indent: u8,
}

fuzz_target!(|blocks: Vec<OutputBlock>| {
    if blocks.len() > 16 {
        return;
    }

    let mut text = String::new();
    for block in &blocks {
        let name: String = block
            .name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .take(32)
            .collect();
        text.push_str(&format!("output \"{}\" {{\n", name));
        for line in block.lines.iter().take(8) {
            let line: String = line.chars().filter(|c| *c != '\n').take(128).collect();
            text.push_str(&" ".repeat(usize::from(block.indent % 8)));
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str("}\n\n");
    }

    let _ = tfguard_repo::fuzz::parse_config(&text);
    if let Ok(once) = tfguard_repo::fuzz::format_config(&text) {
        let twice = tfguard_repo::fuzz::format_config(&once)
            .expect("formatted output should parse again");
        assert_eq!(once, twice, "formatting is not idempotent");
    }
});
