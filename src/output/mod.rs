//! Result sinks: console tree rendering and JSON export.
//!
//! The core hands over a plain nested mapping; everything here is
//! presentation.

use crate::report::Report;
use crate::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Batch results: seed URL -> report for that run.
pub type BatchResults = BTreeMap<String, Report>;

/// Renders results as an indented tree: seed, then referring page, then
/// status code, then the failing URLs.
pub fn render_tree(results: &BatchResults) -> String {
    let mut out = String::new();

    for (seed, report) in results {
        out.push_str(seed);
        out.push('\n');

        if report.is_empty() {
            out.push_str("    no broken links\n\n");
            continue;
        }

        for (parent, codes) in report.iter() {
            out.push_str("    ");
            out.push_str(parent);
            out.push('\n');

            for (code, urls) in codes {
                out.push_str(&format!("        {}\n", code));
                for url in urls {
                    out.push_str(&format!("            {}\n", url));
                }
            }
        }

        out.push('\n');
    }

    out
}

/// Writes `result.json` under `dir` and returns the path written.
pub fn write_json(dir: &Path, results: &BatchResults) -> Result<PathBuf> {
    let path = dir.join("result.json");
    let json = serde_json::to_string_pretty(results)?;
    fs::write(&path, json)?;
    Ok(path)
}
