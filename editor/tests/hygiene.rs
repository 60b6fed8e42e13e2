//! Hygiene: scans the editor crate for panics and silently discarded errors.
//!
//! The shell runs inside an interactive session; a panic there loses every
//! unsaved edit, so each pattern keeps a budget of zero.

use std::fs;
use std::path::Path;

const BUDGETED: [(&str, usize); 8] = [
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    ("#[allow(dead_code)]", 0),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `editor/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            if count > 0 { Some((file.path.clone(), count)) } else { None }
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn source_tree_is_not_empty() {
    assert!(!source_files().is_empty(), "hygiene scan found no sources; run from the crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    for (pattern, budget) in BUDGETED {
        let hits = count_in_source(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        assert!(
            count <= budget,
            "`{pattern}` budget exceeded: found {count}, max {budget}.\n{}",
            format_hits(&hits)
        );
    }
}
