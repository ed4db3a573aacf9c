//! JSON-file respondent store
//!
//! All respondents live in a single `responses.json` array under the data
//! directory. The file is loaded once on open and rewritten after every
//! mutation through a temporary file, so a crash mid-write leaves the
//! previous contents intact.

use super::{check_insert, newest_first, ResponseStore, StoreError, StoreResult};
use crate::models::{normalize_email, Respondent};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const RESPONSES_FILE: &str = "responses.json";

pub struct JsonFileStore {
    path: PathBuf,
    respondents: Vec<Respondent>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store under `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = data_dir.join(RESPONSES_FILE);
        let respondents = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                    path: path.display().to_string(),
                    source,
                })?
            }
        } else {
            Vec::new()
        };
        debug!("Opened {} with {} respondents", path.display(), respondents.len());
        Ok(Self { path, respondents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.respondents).map_err(|source| {
            StoreError::Serialize {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl ResponseStore for JsonFileStore {
    fn name(&self) -> &str {
        "json-file"
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<Respondent>> {
        let email = normalize_email(email);
        Ok(self
            .respondents
            .iter()
            .find(|r| normalize_email(&r.demographics.email) == email)
            .cloned())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Respondent>> {
        Ok(self.respondents.iter().find(|r| r.id == id).cloned())
    }

    fn insert(&mut self, respondent: Respondent) -> StoreResult<()> {
        check_insert(&self.respondents, &respondent)?;
        let id = respondent.id.clone();
        self.respondents.push(respondent);
        if let Err(e) = self.persist() {
            self.respondents.retain(|r| r.id != id);
            return Err(e);
        }
        info!(
            "Stored respondent {} in {} store at {}",
            id,
            self.name(),
            self.path.display()
        );
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Respondent>> {
        let mut all = self.respondents.clone();
        newest_first(&mut all);
        Ok(all)
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let Some(pos) = self.respondents.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = self.respondents.remove(pos);
        if let Err(e) = self.persist() {
            self.respondents.insert(pos, removed);
            return Err(e);
        }
        info!("Deleted respondent {} from {} store", id, self.name());
        Ok(true)
    }
}
