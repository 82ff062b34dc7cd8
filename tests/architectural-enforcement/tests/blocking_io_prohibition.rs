//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async functions in the client MUST NOT use blocking I/O.
//! **Required**: `tokio::fs`, `tokio::io`, `reqwest` async client.
//!
//! Blocking calls are acceptable in non-async functions that run before the
//! runtime does real work (configuration loading) and in test code.

use architectural_enforcement::{assert_no_violations, source_files};

const CHECKED_DIRS: [&str; 2] = ["arcana/core/src", "arcana/cli/src"];

const FORBIDDEN: [(&str, &str); 6] = [
    ("std::fs::", "Blocking file I/O"),
    ("std::net::", "Blocking network I/O"),
    ("std::process::Command", "Blocking process I/O"),
    ("reqwest::blocking", "Blocking HTTP client"),
    ("std::io::stdin()", "Blocking stdin"),
    ("std::io::stdout()", "Blocking stdout"),
];

#[test]
fn test_no_blocking_io_in_async_code() {
    let mut violations = Vec::new();

    for dir in CHECKED_DIRS {
        for file in source_files(dir) {
            for idx in 0..file.lines.len() {
                let code = file.code(idx);
                for (pattern, kind) in FORBIDDEN {
                    if code.contains(pattern) && file.in_async_fn(idx) {
                        violations.push(file.violation(idx, kind));
                    }
                }
            }
        }
    }

    assert_no_violations("blocking I/O in async code", &violations);
}

#[test]
fn test_no_blocking_http_client_anywhere() {
    let violations: Vec<String> = CHECKED_DIRS
        .iter()
        .flat_map(|dir| source_files(dir))
        .flat_map(|file| {
            (0..file.lines.len())
                .filter(|&idx| file.code(idx).contains("reqwest::blocking"))
                .map(|idx| file.violation(idx, "Blocking HTTP client"))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_no_violations("blocking HTTP client", &violations);
}

#[test]
fn test_checked_dirs_are_scanned() {
    for dir in CHECKED_DIRS {
        assert!(
            !source_files(dir).is_empty(),
            "{dir} has no sources; the scan would pass vacuously"
        );
    }
}
