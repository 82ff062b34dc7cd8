//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code MUST NOT sleep. Waiting happens on I/O, on the
//! cancel token, or on the loading watch channel; never on a timer.

use architectural_enforcement::{assert_no_violations, source_files};

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for dir in ["arcana/core/src", "arcana/cli/src"] {
        for file in source_files(dir) {
            for idx in 0..file.lines.len() {
                let code = file.code(idx);
                if code.contains("thread::sleep") || code.contains("time::sleep") {
                    violations.push(file.violation(idx, "Sleep call"));
                }
            }
        }
    }

    assert_no_violations("sleep calls in production code", &violations);
}
