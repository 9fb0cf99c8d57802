//! Category discovery and run file lookup.
//!
//! A base directory holds one subdirectory per category (state), and each
//! category holds numbered run logs named `{run}_{variant}.txt`.

use crate::error::{AnalyticsError, AnalyticsResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A category directory found under the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Directory name, used as the category name.
    pub name: String,
    /// Full path to the category directory.
    pub path: PathBuf,
}

/// A run log that exists on disk and would be read by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRun {
    pub variant: String,
    pub run: usize,
    pub path: PathBuf,
}

/// Scanner for category directories under a base path.
pub struct CategoryScanner {
    base_path: PathBuf,
}

impl CategoryScanner {
    /// Create a new scanner rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// List the immediate subdirectories of the base path, sorted by name.
    ///
    /// Plain files are skipped. Symlinks count when they point at a
    /// directory; dot-named directories are categories like any other.
    pub fn categories(&self) -> AnalyticsResult<Vec<Category>> {
        let mut categories = Vec::new();

        let walker = WalkDir::new(&self.base_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|source| AnalyticsError::Walk {
                path: self.base_path.clone(),
                source,
            })?;

            // Follows symlinks; dangling links are not directories.
            if !entry.path().is_dir() {
                debug!("Skipping non-directory {}", entry.path().display());
                continue;
            }

            categories.push(Category {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.into_path(),
            });
        }

        Ok(categories)
    }

    /// List the run files that exist for each variant of a category.
    pub fn planned_runs(
        &self,
        category: &Category,
        variants: &[String],
        max_runs: usize,
    ) -> Vec<PlannedRun> {
        let mut planned = Vec::new();

        for variant in variants {
            for run in 1..=max_runs {
                let path = run_file_path(&category.path, run, variant);
                if path.exists() {
                    planned.push(PlannedRun {
                        variant: variant.clone(),
                        run,
                        path,
                    });
                }
            }
        }

        planned
    }
}

/// Expected log file for a run: `<category>/{run}_{variant}.txt`.
pub fn run_file_path(category_path: &Path, run: usize, variant: &str) -> PathBuf {
    category_path.join(format!("{}_{}.txt", run, variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_file_path() {
        let path = run_file_path(Path::new("logs/CA"), 3, "greedy");
        assert_eq!(path, PathBuf::from("logs/CA/3_greedy.txt"));
    }

    #[test]
    fn test_categories_are_immediate_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("SP")).unwrap();
        std::fs::create_dir(temp_dir.path().join("AC")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("AC").join("nested")).unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "not a category").unwrap();

        let scanner = CategoryScanner::new(temp_dir.path());
        let categories = scanner.categories().unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AC", "SP"]);
        assert_eq!(categories[0].path, temp_dir.path().join("AC"));
    }

    #[test]
    fn test_dot_named_directory_is_a_category() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(".SP")).unwrap();
        std::fs::create_dir(temp_dir.path().join("CA")).unwrap();

        let categories = CategoryScanner::new(temp_dir.path()).categories().unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![".SP", "CA"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_a_category() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let target = elsewhere.path().join("RJ");
        std::fs::create_dir(&target).unwrap();
        std::fs::create_dir(temp_dir.path().join("CA")).unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("RJ")).unwrap();
        std::os::unix::fs::symlink(
            elsewhere.path().join("gone"),
            temp_dir.path().join("XX"),
        )
        .unwrap();

        let categories = CategoryScanner::new(temp_dir.path()).categories().unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CA", "RJ"]);
        assert_eq!(categories[1].path, temp_dir.path().join("RJ"));
    }

    #[test]
    fn test_missing_base_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = CategoryScanner::new(temp_dir.path().join("missing"));

        let err = scanner.categories().unwrap_err();
        assert!(matches!(err, AnalyticsError::Walk { .. }));
    }

    #[test]
    fn test_planned_runs_only_lists_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("CA");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("1_generic.txt"), "").unwrap();
        std::fs::write(dir.join("4_generic.txt"), "").unwrap();
        std::fs::write(dir.join("11_generic.txt"), "").unwrap();
        std::fs::write(dir.join("2_greedy.txt"), "").unwrap();

        let scanner = CategoryScanner::new(temp_dir.path());
        let category = Category {
            name: "CA".to_string(),
            path: dir,
        };
        let variants = vec!["generic".to_string(), "greedy".to_string()];
        let planned = scanner.planned_runs(&category, &variants, 10);

        let runs: Vec<_> = planned
            .iter()
            .map(|p| (p.variant.as_str(), p.run))
            .collect();
        assert_eq!(runs, vec![("generic", 1), ("generic", 4), ("greedy", 2)]);
    }
}
