//! Multi-file scanning.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{FileAnnotations, ScanConfig, ScanResult, Scanner};
use crate::buffer::Document;
use crate::settings::Settings;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules", "target", "dist", "build"];

/// Scans files from disk.
pub struct Runner {
    scanner: Scanner,
    config: ScanConfig,
}

impl Runner {
    /// Create a new runner using the built-in catalog.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_scanner(Scanner::default(), config)
    }

    pub fn with_scanner(scanner: Scanner, config: ScanConfig) -> Self {
        Self { scanner, config }
    }

    /// Scan files in parallel. Results are sorted by path.
    ///
    /// Files that cannot be read are recorded in `skipped` rather than
    /// failing the whole run.
    pub fn run<P: AsRef<Path> + Sync>(&self, files: &[P]) -> ScanResult {
        let outcomes: Vec<Result<FileAnnotations, String>> = files
            .par_iter()
            .map(|file| self.scan_file(file.as_ref()))
            .collect();

        let mut result = ScanResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(file) => {
                    result.scanned += 1;
                    result.files.push(file);
                }
                Err(path) => result.skipped.push(path),
            }
        }
        result.files.sort_by(|a, b| a.file.cmp(&b.file));
        result.skipped.sort();

        debug!(
            scanned = result.scanned,
            skipped = result.skipped.len(),
            annotations = result.total(),
            "run complete"
        );
        result
    }

    fn scan_file(&self, path: &Path) -> Result<FileAnnotations, String> {
        let file = path.to_string_lossy().to_string();
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                warn!(file = %file, error = %e, "skipping unreadable file");
                return Err(file);
            }
        };
        let document = Document::from_text(&String::from_utf8_lossy(&bytes));
        let annotations = self.scanner.scan(&document, &self.config);
        Ok(FileAnnotations { file, annotations })
    }
}

/// Collect scannable files under the given paths.
///
/// Explicit file arguments are always included. Directories are walked,
/// skipping hidden and vendored directories, keeping files whose extension
/// is listed in the settings and that no excluded glob matches.
pub fn collect_files<P: AsRef<Path>>(
    roots: &[P],
    settings: &Settings,
) -> anyhow::Result<Vec<PathBuf>> {
    let excluded = settings.excluded_matcher()?;
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if root.is_file() {
            files.push(root.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && !SKIPPED_DIRS.contains(&&*name)
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !settings.extensions.iter().any(|e| e == ext) {
                continue;
            }
            if excluded.is_match(path) {
                debug!(file = %path.display(), "excluded by settings");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::ChancePercent;
    use tempfile::TempDir;

    fn full_chance() -> ScanConfig {
        ScanConfig::new(true, ChancePercent::new(100).unwrap())
    }

    #[test]
    fn test_runner_basic() {
        let temp = TempDir::new().unwrap();
        let main_rs = temp.path().join("main.rs");
        std::fs::write(
            &main_rs,
            "fn main() {\n    // long enough comment line\n    let value = compute(42);\n}\n",
        )
        .unwrap();

        let result = Runner::new(full_chance()).run(&[&main_rs]);
        assert_eq!(result.scanned, 1);
        assert_eq!(result.files.len(), 1);
        let lines: Vec<usize> = result.files[0].annotations.iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![0, 2]);
    }

    #[test]
    fn test_runner_ignores_byte_order_mark() {
        let temp = TempDir::new().unwrap();
        let main_rs = temp.path().join("main.rs");
        std::fs::write(
            &main_rs,
            "\u{FEFF}// this is a sufficiently long comment line\nfn main() {}\n",
        )
        .unwrap();

        let result = Runner::new(full_chance()).run(&[&main_rs]);
        let lines: Vec<usize> = result.files[0].annotations.iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![1]);
    }

    #[test]
    fn test_runner_skips_missing_files() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.rs");
        let result = Runner::new(full_chance()).run(&[&missing]);
        assert_eq!(result.scanned, 0);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_runner_disabled() {
        let temp = TempDir::new().unwrap();
        let main_rs = temp.path().join("main.rs");
        std::fs::write(&main_rs, "let value = compute(42);\n").unwrap();
        let config = ScanConfig::new(false, ChancePercent::new(100).unwrap());
        let result = Runner::new(config).run(&[&main_rs]);
        assert_eq!(result.scanned, 1);
        assert!(result.is_empty());
    }

    #[test]
    fn test_runner_custom_catalog() {
        let temp = TempDir::new().unwrap();
        let main_rs = temp.path().join("main.rs");
        std::fs::write(&main_rs, "let value = compute(42);\n").unwrap();

        let catalog = crate::select::Catalog::new(&["Roger, Roger."]).unwrap();
        let scanner = Scanner::new(crate::select::Selector::new(catalog));
        let result = Runner::with_scanner(scanner, full_chance()).run(&[&main_rs]);
        assert_eq!(result.files[0].annotations[0].message, "Roger, Roger.");
    }

    #[test]
    fn test_collect_files_filters() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("generated")).unwrap();
        std::fs::write(root.join("src/lib.rs"), "").unwrap();
        std::fs::write(root.join("src/notes.txt"), "").unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        std::fs::write(root.join(".git/hook.py"), "").unwrap();
        std::fs::write(root.join("generated/out.rs"), "").unwrap();

        let settings = Settings {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..Default::default()
        };
        let files = collect_files(&[root], &settings).unwrap();
        assert_eq!(files, vec![root.join("src/lib.rs")]);
    }
}
