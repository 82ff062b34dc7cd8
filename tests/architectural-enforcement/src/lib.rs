//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No blocking I/O inside async functions
//! - No sleep() calls in production code
//! - Mapping and rendering stay pure (no runtime, network or file access)
//!
//! The helpers below do a line-based scan of the workspace sources. Everything
//! from the first `#[cfg(test)]` of a file onwards is treated as test code.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, resolved from this crate's manifest directory
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Production source file split into lines
#[derive(Debug)]
pub struct SourceFile {
    /// Path relative to the workspace root
    pub path: PathBuf,
    /// Lines before the first `#[cfg(test)]`
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Read a file and drop its test section
    #[must_use]
    pub fn load(root: &Path, path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let lines = content
            .lines()
            .take_while(|line| line.trim() != "#[cfg(test)]")
            .map(str::to_string)
            .collect();
        Some(Self {
            path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            lines,
        })
    }

    /// Code part of line `idx`, with any `//` comment removed
    #[must_use]
    pub fn code(&self, idx: usize) -> &str {
        let line = &self.lines[idx];
        line.split("//").next().unwrap_or(line)
    }

    /// Whether line `idx` is inside an `async fn`
    #[must_use]
    pub fn in_async_fn(&self, idx: usize) -> bool {
        let lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        enclosing_fn_is_async(&lines, idx)
    }

    /// Format a violation for line `idx`
    #[must_use]
    pub fn violation(&self, idx: usize, kind: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            idx + 1,
            kind,
            self.lines[idx].trim()
        )
    }
}

/// All production `.rs` files under `dir` (relative to the workspace root)
#[must_use]
pub fn source_files(dir: &str) -> Vec<SourceFile> {
    let root = workspace_root();
    let base = root.join(dir);
    if !base.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(&base)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|entry| SourceFile::load(&root, entry.path()))
        .collect()
}

/// Classify a line as a function signature: `Some(true)` for `async fn`
#[must_use]
pub fn fn_signature(line: &str) -> Option<bool> {
    let mut rest = line.trim();
    for prefix in ["pub(crate) ", "pub(super) ", "pub "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
            break;
        }
    }
    if rest.starts_with("async fn ") {
        Some(true)
    } else if rest.starts_with("fn ") || rest.starts_with("const fn ") {
        Some(false)
    } else {
        None
    }
}

/// Whether the nearest function signature above `idx` is `async`
#[must_use]
pub fn enclosing_fn_is_async(lines: &[&str], idx: usize) -> bool {
    (0..=idx)
        .rev()
        .find_map(|i| fn_signature(lines[i]))
        .unwrap_or(false)
}

/// Print violations and panic if there are any
///
/// # Panics
///
/// Panics when `violations` is not empty.
pub fn assert_no_violations(title: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ CRITICAL: {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!(
        "\nFound {} violation(s): {title}.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_signature() {
        assert_eq!(fn_signature("    pub async fn execute(&self) {"), Some(true));
        assert_eq!(fn_signature("fn helper() -> u8 {"), Some(false));
        assert_eq!(fn_signature("pub(crate) fn string_field("), Some(false));
        assert_eq!(fn_signature("let f = async move {"), None);
    }

    #[test]
    fn test_enclosing_fn() {
        let code = [
            "pub async fn bad() {",
            "    let x = 1;",
            "}",
            "fn good() {",
            "    std::fs::read_to_string(\"a\");",
            "}",
        ];
        assert!(enclosing_fn_is_async(&code, 1));
        assert!(!enclosing_fn_is_async(&code, 4));
    }

    #[test]
    fn test_workspace_root_has_core_crate() {
        assert!(workspace_root().join("arcana/core/Cargo.toml").exists());
    }
}
