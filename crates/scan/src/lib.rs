use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;
use walkdir::WalkDir;

/// One scanned file's failure-matching lines, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub path: PathBuf,
    pub lines: String,
}

/// Reported excerpts are cut at this many characters.
const EXCERPT_LIMIT: usize = 8000;

fn failure_pattern() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"ERROR|Error|FAILED|FAIL|Process completed with exit code|deprecated_member_use|Exception|Java heap space",
        )
        .unwrap()
    })
}

/// Whether a file's location ties it to the build job. Matches are
/// case-sensitive except the apk file-name check.
fn is_build_log(dir: &str, file_name: &str) -> bool {
    dir.contains("build-test")
        || file_name.contains("build-test")
        || dir.contains("analyze-and-test")
        || file_name.to_lowercase().contains("build apk")
}

/// Walk the extraction tree and collect failure excerpts from build job
/// logs. Files are decoded lossily; a file that cannot be read is skipped
/// rather than aborting the scan.
pub fn scan_tree(root: &Path) -> Vec<Excerpt> {
    let pattern = failure_pattern();
    let mut excerpts = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let dir = entry.path().parent().map(|p| p.to_string_lossy()).unwrap_or_default();
        let file_name = entry.file_name().to_string_lossy();
        if !is_build_log(&dir, &file_name) {
            continue;
        }
        let Ok(bytes) = fs::read(entry.path()) else {
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);
        let lines =
            text.lines().filter(|line| pattern.is_match(line)).collect::<Vec<_>>().join("\n");
        if !lines.is_empty() {
            excerpts.push(Excerpt { path: entry.into_path(), lines });
        }
    }
    excerpts
}

/// Render the final report: a header per excerpt, each excerpt cut at its
/// first 8000 characters, or a single message when nothing matched.
pub fn render_report(excerpts: &[Excerpt]) -> String {
    if excerpts.is_empty() {
        return "No obvious failure lines found in build-test logs; job may have succeeded."
            .to_string();
    }
    let mut out = String::from("Found failure excerpts:\n");
    for Excerpt { path, lines } in excerpts {
        out.push_str(&format!("\n--- {} ---\n", path.display()));
        out.push_str(truncate_chars(lines, EXCERPT_LIMIT));
        out.push('\n');
    }
    out
}

fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
