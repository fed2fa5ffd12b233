//! Common password corpus
//!
//! Loads the known-weak password list and answers membership queries.
//! The corpus is immutable once loaded.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use crate::oracle::{OracleError, WeakPasswordOracle};

static COMMON_PASSWORDS: RwLock<Option<Arc<CommonPasswords>>> = RwLock::new(None);

const PATH_VAR: &str = "PWD_COMMON_PASSWORDS_PATH";
const DEFAULT_PATH: &str = "./assets/common-passwords.txt";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Common password file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read common password file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Common password file is empty")]
    EmptyFile,
}

/// A set of lowercase known-weak passwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPasswords {
    passwords: HashSet<String>,
}

impl CommonPasswords {
    /// Loads one password per line; entries are trimmed and lowercased,
    /// blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File has no entries
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common password corpus FAILED: file not found {:?}", path);
            return Err(CorpusError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let corpus: Self = content.lines().collect();

        if corpus.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common password corpus FAILED: empty file {:?}", path);
            return Err(CorpusError::EmptyFile);
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Common password corpus loaded: {} passwords from {:?}", corpus.len(), path);

        Ok(corpus)
    }

    /// Membership after the same normalisation as the entries: surrounding
    /// whitespace trimmed, lowercased.
    pub fn contains(&self, password: &str) -> bool {
        self.passwords.contains(&password.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CommonPasswords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let passwords = iter
            .into_iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { passwords }
    }
}

impl WeakPasswordOracle for CommonPasswords {
    fn is_weak(&self, normalized: &str) -> Result<bool, OracleError> {
        Ok(self.contains(normalized))
    }
}

/// Returns the corpus file path.
///
/// Priority:
/// 1. Environment variable `PWD_COMMON_PASSWORDS_PATH`
/// 2. Default path `./assets/common-passwords.txt`
pub fn corpus_path() -> PathBuf {
    std::env::var(PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH))
}

/// Loads the process-wide corpus from [`corpus_path`].
///
/// Call once at startup; later calls return the size of the corpus
/// already loaded.
///
/// # Example
///
/// ```rust,ignore
/// unsafe { std::env::set_var("PWD_COMMON_PASSWORDS_PATH", "/etc/myapp/common.txt"); }
/// pwd_policy::init_common_passwords()?;
/// ```
pub fn init_common_passwords() -> Result<usize, CorpusError> {
    init_common_passwords_from_path(corpus_path())
}

/// Loads the process-wide corpus from a specific file.
pub fn init_common_passwords_from_path<P: AsRef<Path>>(path: P) -> Result<usize, CorpusError> {
    // Hold the write lock across the load so concurrent callers load once.
    let mut guard = COMMON_PASSWORDS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = guard.as_ref() {
        return Ok(existing.len());
    }

    let corpus = CommonPasswords::load(path)?;
    let count = corpus.len();
    *guard = Some(Arc::new(corpus));
    Ok(count)
}

/// The process-wide corpus, or `None` before initialisation.
pub fn common_passwords() -> Option<Arc<CommonPasswords>> {
    COMMON_PASSWORDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Oracle backed by the process-wide corpus.
///
/// Nothing is judged weak until the corpus has been initialised.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedCorpus;

impl WeakPasswordOracle for SharedCorpus {
    fn is_weak(&self, normalized: &str) -> Result<bool, OracleError> {
        match common_passwords() {
            Some(corpus) => corpus.is_weak(normalized),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Common password corpus not initialised; check skipped");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn reset_common_passwords_for_testing() {
    let mut guard = COMMON_PASSWORDS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}
