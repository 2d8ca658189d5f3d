#![no_main]

//! Fuzz target for message tokenization
//!
//! Arbitrary byte sequences, including invalid UTF-8 and pathological
//! whitespace, must never panic the tokenizer.

use libfuzzer_sys::fuzz_target;

use chronicle_analysis::tokenize_message;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        let terms = tokenize_message(message);
        for term in terms {
            // every surviving term honors the length floor
            assert!(term.len() > 3);
        }
    }
});
