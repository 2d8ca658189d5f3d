#![no_main]

//! Fuzz target for commit field helpers
//!
//! Hash validation, subject extraction, and ref-marker matching must never
//! panic on arbitrary strings.

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use chronicle_git::Commit;

fuzz_target!(|input: (String, String, String)| {
    let (candidate, message, marker) = input;

    // validation itself must accept any string
    let _ = Commit::is_valid_hash(&candidate);

    let commit = Commit {
        hash: "7c20aee54bd698b175f1217e58b6b3290d2b9f41".to_string(),
        timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        author_name: "Fuzz".to_string(),
        author_email: "fuzz@example.com".to_string(),
        message,
        diff: None,
        refs: vec![marker.clone()],
    };

    assert_eq!(commit.short_hash(), "7c20aee");
    assert!(commit.message.starts_with(commit.subject()));
    assert!(commit.has_ref_marker(&marker));
});
