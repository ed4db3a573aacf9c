//! In-memory respondent store

use super::{check_insert, newest_first, ResponseStore, StoreResult};
use crate::models::{normalize_email, Respondent};

/// Volatile store backed by a vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    respondents: Vec<Respondent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }
}

impl ResponseStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
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
        self.respondents.push(respondent);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Respondent>> {
        let mut all = self.respondents.clone();
        newest_first(&mut all);
        Ok(all)
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.respondents.len();
        self.respondents.retain(|r| r.id != id);
        Ok(self.respondents.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::exercise_store;

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.name(), "memory");
        exercise_store(&mut store);
        assert_eq!(store.len(), 2);
    }
}
