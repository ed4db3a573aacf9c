//! Respondent persistence
//!
//! The scoring engine never touches storage. This module is the seam the
//! submission boundary writes through, with two layers:
//! - [`MemoryStore`] for tests and one-shot runs
//! - [`JsonFileStore`] persisting to `<data_dir>/responses.json`
//!
//! Both enforce "one respondent per email" on insert, independent of the
//! check the submission boundary performs first.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::Respondent;
use thiserror::Error;

/// Storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a respondent with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("a respondent with id '{0}' already exists")]
    DuplicateId(String),

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize respondents for {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Common interface for respondent stores
pub trait ResponseStore {
    /// Name of this store (for logging)
    fn name(&self) -> &str;

    /// Respondent with this email (compared after normalization)
    fn find_by_email(&self, email: &str) -> StoreResult<Option<Respondent>>;

    fn get(&self, id: &str) -> StoreResult<Option<Respondent>>;

    /// Insert a respondent; rejects duplicate emails and ids
    fn insert(&mut self, respondent: Respondent) -> StoreResult<()>;

    /// All respondents, newest first
    fn list(&self) -> StoreResult<Vec<Respondent>>;

    /// Remove a respondent with its answers and result. Returns false if absent.
    fn delete(&mut self, id: &str) -> StoreResult<bool>;
}

/// Shared insert rules for list-backed stores
fn check_insert(existing: &[Respondent], candidate: &Respondent) -> StoreResult<()> {
    let email = crate::models::normalize_email(&candidate.demographics.email);
    if existing
        .iter()
        .any(|r| crate::models::normalize_email(&r.demographics.email) == email)
    {
        return Err(StoreError::DuplicateEmail(email));
    }
    if existing.iter().any(|r| r.id == candidate.id) {
        return Err(StoreError::DuplicateId(candidate.id.clone()));
    }
    Ok(())
}

/// Newest first, id as a stable tiebreaker
fn newest_first(respondents: &mut [Respondent]) {
    respondents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
