//! Integration Test: Pure Mapping and Rendering
//!
//! **Policy**: the content tables, wire model, view-model mapper and renderer
//! are synchronous and side-effect free. They MUST NOT reach for the async
//! runtime, the HTTP client, the file system or the network. Only the backend,
//! coordinator and controller do I/O.

use architectural_enforcement::{assert_no_violations, source_files};

const PURE_SOURCES: [&str; 4] = [
    "arcana/core/src/content.rs",
    "arcana/core/src/model.rs",
    "arcana/core/src/mapper.rs",
    "arcana/core/src/render",
];

const FORBIDDEN: [(&str, &str); 6] = [
    ("tokio", "Async runtime"),
    ("reqwest", "HTTP client"),
    ("std::fs", "File system"),
    ("std::net", "Network"),
    ("std::io", "Standard I/O"),
    ("async fn", "Async function"),
];

#[test]
fn test_mapping_and_rendering_are_pure() {
    let mut violations = Vec::new();

    for path in PURE_SOURCES {
        for file in source_files(path) {
            for idx in 0..file.lines.len() {
                let code = file.code(idx);
                for (pattern, kind) in FORBIDDEN {
                    if code.contains(pattern) {
                        violations.push(file.violation(idx, kind));
                    }
                }
            }
        }
    }

    assert_no_violations("I/O in pure modules", &violations);
}

#[test]
fn test_pure_sources_exist() {
    for path in PURE_SOURCES {
        assert!(!source_files(path).is_empty(), "{path} not found");
    }
}
