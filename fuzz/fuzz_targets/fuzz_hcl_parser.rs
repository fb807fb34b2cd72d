//! Fuzz target for Terraform file parsing.
//!
//! The parser may reject input but must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_hcl_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tfguard_repo::fuzz::parse_config(text);
    }
});
