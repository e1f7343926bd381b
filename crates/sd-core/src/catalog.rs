//! Change catalog: discovers numbered script files in a directory.
//!
//! The change number of a script is the first contiguous run of ASCII digits
//! anywhere in its file name (`001_init.sql` -> 1, `v12-users.php` -> 12).
//! Files without a digit run are not scripts and are ignored.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"))
}

/// Extract the change number from a script file name.
///
/// Returns `Ok(None)` when the name contains no digits, and
/// [`CoreError::InvalidChangeNumber`] when the digit run does not fit in an
/// `i64`.
///
/// # Examples
/// ```
/// use sd_core::parse_change_number;
/// assert_eq!(parse_change_number("005_idx.sql").unwrap(), Some(5));
/// assert_eq!(parse_change_number("readme.txt").unwrap(), None);
/// ```
pub fn parse_change_number(file_name: &str) -> CoreResult<Option<i64>> {
    let Some(digits) = digit_run().find(file_name) else {
        return Ok(None);
    };
    digits
        .as_str()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| CoreError::InvalidChangeNumber {
            file_name: file_name.to_string(),
            digits: digits.as_str().to_string(),
        })
}

/// A script file discovered in the script directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFile {
    /// Number extracted from the file name
    pub change_number: i64,
    /// Bare file name, recorded as the changelog description
    pub file_name: String,
    /// Absolute path handed to the script runner
    pub path: PathBuf,
}

impl ChangeFile {
    /// Build a change file located in `dir`.
    pub fn new(change_number: i64, file_name: impl Into<String>, dir: &Path) -> Self {
        let file_name = file_name.into();
        let path = dir.join(&file_name);
        Self {
            change_number,
            file_name,
            path,
        }
    }
}

/// Script files ordered by ascending change number.
///
/// Construction rejects two files sharing a change number, so iteration
/// order is a strict total order on `change_number`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeCatalog {
    changes: Vec<ChangeFile>,
}

impl ChangeCatalog {
    /// Sort files by change number and reject duplicates.
    ///
    /// `files` is expected in directory-listing order; when two files share
    /// a number, the error names them in that order.
    pub fn from_files(mut files: Vec<ChangeFile>) -> CoreResult<Self> {
        files.sort_by_key(|f| f.change_number);

        if let Some(pair) = files
            .windows(2)
            .find(|w| w[0].change_number == w[1].change_number)
        {
            return Err(CoreError::DuplicateChangeNumber {
                change_number: pair[0].change_number,
                first: pair[0].file_name.clone(),
                second: pair[1].file_name.clone(),
            });
        }

        Ok(Self { changes: files })
    }

    /// Iterate in ascending change-number order
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeFile> {
        self.changes.iter()
    }

    /// Number of scripts in the catalog
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the catalog has no scripts
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Look up a script by change number
    pub fn get(&self, change_number: i64) -> Option<&ChangeFile> {
        self.changes
            .binary_search_by_key(&change_number, |f| f.change_number)
            .ok()
            .map(|idx| &self.changes[idx])
    }

    /// All change numbers in ascending order
    pub fn change_numbers(&self) -> Vec<i64> {
        self.changes.iter().map(|f| f.change_number).collect()
    }
}

impl<'a> IntoIterator for &'a ChangeCatalog {
    type Item = &'a ChangeFile;
    type IntoIter = std::slice::Iter<'a, ChangeFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Enumerate numbered scripts in `dir`, in file-system order.
///
/// Only regular files are considered. Names that are not valid UTF-8 are
/// skipped with a warning.
fn scan_directory(dir: &Path) -> CoreResult<Vec<ChangeFile>> {
    if !dir.is_dir() {
        return Err(CoreError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let io_err = |source: std::io::Error| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source,
    };

    let base = dir.canonicalize().map_err(io_err)?;
    let mut files = Vec::new();

    for entry in std::fs::read_dir(&base).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let os_name = entry.file_name();
        let Some(name) = os_name.to_str() else {
            log::warn!("Skipping script with non UTF-8 name: {}", path.display());
            continue;
        };

        match parse_change_number(name)? {
            Some(change_number) => files.push(ChangeFile::new(change_number, name, &base)),
            None => log::debug!("Ignoring {} (no change number)", name),
        }
    }

    Ok(files)
}

/// Build the ordered catalog of scripts in `dir`.
pub fn list_changes(dir: &Path) -> CoreResult<ChangeCatalog> {
    let files = scan_directory(dir)?;
    ChangeCatalog::from_files(files)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
