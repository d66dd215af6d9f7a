//! Weak pattern list
//!
//! Substrings that cost a password strength points. The built-in list is
//! always active; a deployment may extend it from a text file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Substrings that always count as weak, matched case-insensitively.
pub const BUILTIN_WEAK_PATTERNS: &[&str] = &["123", "abc", "password", "qwerty", "qwert"];

pub const WEAK_PATTERNS_ENV: &str = "PWD_FORM_WEAK_PATTERNS_PATH";

const DEFAULT_PATTERNS_PATH: &str = "./assets/weak-patterns.txt";

static EXTRA_PATTERNS: RwLock<Option<HashSet<String>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum PatternListError {
    #[error("Weak pattern file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read weak pattern file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Weak pattern file is empty")]
    EmptyFile,
}

/// Returns the extra pattern file path.
///
/// Priority:
/// 1. Environment variable `PWD_FORM_WEAK_PATTERNS_PATH`
/// 2. Default path `./assets/weak-patterns.txt`
pub fn weak_patterns_path() -> PathBuf {
    std::env::var(WEAK_PATTERNS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATTERNS_PATH))
}

/// Loads extra weak patterns from the file named by the environment.
///
/// # Errors
///
/// Returns error if the file does not exist, cannot be read, or holds no
/// patterns.
pub fn init_weak_patterns() -> Result<usize, PatternListError> {
    init_weak_patterns_from_path(weak_patterns_path())
}

/// Loads extra weak patterns from a specific file, one per line.
///
/// Idempotent: once a list is loaded, later calls return its size without
/// touching the file.
pub fn init_weak_patterns_from_path<P: AsRef<Path>>(path: P) -> Result<usize, PatternListError> {
    {
        let guard = EXTRA_PATTERNS.read().unwrap();
        if let Some(set) = guard.as_ref() {
            return Ok(set.len());
        }
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Weak pattern initialization FAILED: FileNotFound {:?}", path);
        return Err(PatternListError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    let set: HashSet<String> = content
        .lines()
        .map(|l| l.trim().to_ascii_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    if set.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Weak pattern initialization FAILED: Empty file {:?}", path);
        return Err(PatternListError::EmptyFile);
    }

    let count = set.len();
    *EXTRA_PATTERNS.write().unwrap() = Some(set);

    #[cfg(feature = "tracing")]
    tracing::info!("Weak patterns initialized: {} extra patterns from {:?}", count, path);

    Ok(count)
}

/// True when the password contains a built-in or loaded weak pattern,
/// ignoring ASCII case.
pub fn contains_weak_pattern(password: &str) -> bool {
    let folded = password.to_ascii_lowercase();
    if BUILTIN_WEAK_PATTERNS.iter().any(|p| folded.contains(p)) {
        return true;
    }
    let guard = EXTRA_PATTERNS.read().unwrap();
    guard
        .as_ref()
        .is_some_and(|extra| extra.iter().any(|p| folded.contains(p.as_str())))
}

#[cfg(test)]
pub fn reset_weak_patterns_for_testing() {
    *EXTRA_PATTERNS.write().unwrap() = None;
}
