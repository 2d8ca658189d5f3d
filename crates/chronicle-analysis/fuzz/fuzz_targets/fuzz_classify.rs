#![no_main]

//! Fuzz target for commit classification
//!
//! Arbitrary commit messages and diff shapes must always classify without
//! panicking, and the impact floor must hold.

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use chronicle_analysis::classify_commit;
use chronicle_git::{Commit, DiffStat};

fuzz_target!(|input: (String, Option<(u16, u16, u16)>)| {
    let (message, diff) = input;

    let commit = Commit {
        hash: "f".repeat(40),
        timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        author_name: "Fuzz".to_string(),
        author_email: "fuzz@example.com".to_string(),
        message,
        diff: diff.map(|(files, ins, del)| DiffStat {
            files_changed: files as usize,
            insertions: ins as usize,
            deletions: del as usize,
        }),
        refs: Vec::new(),
    };

    let classification = classify_commit(&commit);
    assert!(classification.impact >= 1.0);
});
