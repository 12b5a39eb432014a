//! Source hygiene budgets, checked at test time.
//!
//! Scans the workflow crate's production sources for constructs that can
//! crash the page or silently drop errors. Budgets only ever go down.

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, budget, reason)`.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics"),
    (".expect(", 0, "panics"),
    ("panic!(", 0, "panics"),
    ("unreachable!(", 0, "panics"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    ("let _ =", 0, "silently discards a value"),
    (".ok()", 0, "silently discards an error"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("thread::sleep", 0, "time must flow through a TimerHost"),
    ("Instant::now", 0, "time must flow through a TimerHost"),
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, budget, reason) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!("`{pattern}` ({reason}): found {count}, max {budget}\n{}", detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn every_test_file_is_wired() {
    let files = source_files();
    for file in &files {
        for line in file.content.lines() {
            let Some(rest) = line.trim().strip_prefix("#[path = \"") else {
                continue;
            };
            let Some(name) = rest.strip_suffix("\"]") else {
                continue;
            };
            let sibling = file.path.with_file_name(name);
            assert!(sibling.exists(), "{} points at missing {}", file.path.display(), sibling.display());
        }
    }
}
