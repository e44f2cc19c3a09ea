use std::sync::RwLock;

use serde_json::Value;

use crate::survey::types::SurveyDefinition;

use super::{merge_patch, new_record, StoreError, SurveyRepository};

/// Process-local survey table. Contents live only as long as the value does;
/// nothing is written anywhere.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    surveys: RwLock<Vec<SurveyDefinition>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurveyRepository for MemoryRepository {
    fn create(&self, draft: Value) -> Result<SurveyDefinition, StoreError> {
        let record = new_record(draft)?;
        let mut surveys = self.surveys.write().map_err(|_| StoreError::Poisoned)?;
        surveys.push(record.clone());
        Ok(record)
    }

    fn get_by_id(&self, id: &str) -> Result<SurveyDefinition, StoreError> {
        let surveys = self.surveys.read().map_err(|_| StoreError::Poisoned)?;
        surveys
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<SurveyDefinition>, StoreError> {
        let surveys = self.surveys.read().map_err(|_| StoreError::Poisoned)?;
        Ok(surveys.clone())
    }

    fn update(&self, id: &str, patch: Value) -> Result<SurveyDefinition, StoreError> {
        let mut surveys = self.surveys.write().map_err(|_| StoreError::Poisoned)?;
        let slot = surveys
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let merged = merge_patch(slot, patch)?;
        *slot = merged.clone();
        Ok(merged)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut surveys = self.surveys.write().map_err(|_| StoreError::Poisoned)?;
        let before = surveys.len();
        surveys.retain(|s| s.id != id);
        if surveys.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
