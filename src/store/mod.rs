pub mod memory;
pub mod sqlite;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::survey::parse::definition_from_value;
use crate::survey::types::SurveyDefinition;

pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Survey not found")]
    NotFound(String),
    #[error("invalid survey document: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("survey store lock poisoned")]
    Poisoned,
}

/// Storage for survey definitions, keyed by the id the store assigns on
/// `create`. Values go in and come out whole; callers never hold a reference
/// into the store.
pub trait SurveyRepository: Send + Sync {
    fn create(&self, draft: Value) -> Result<SurveyDefinition, StoreError>;
    fn get_by_id(&self, id: &str) -> Result<SurveyDefinition, StoreError>;
    fn list(&self) -> Result<Vec<SurveyDefinition>, StoreError>;
    /// Shallow merge of the patch's top-level fields onto the stored survey.
    fn update(&self, id: &str, patch: Value) -> Result<SurveyDefinition, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn new_record(draft: Value) -> Result<SurveyDefinition, StoreError> {
    let Value::Object(mut fields) = draft else {
        return Err(StoreError::Invalid("survey body must be a JSON object".to_string()));
    };
    fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    fields.insert("createdAt".to_string(), Value::String(now_string()));
    fields.remove("updatedAt");
    definition_from_value(Value::Object(fields)).map_err(|e| StoreError::Invalid(e.to_string()))
}

pub(crate) fn merge_patch(
    existing: &SurveyDefinition,
    patch: Value,
) -> Result<SurveyDefinition, StoreError> {
    let Value::Object(patch) = patch else {
        return Err(StoreError::Invalid("survey body must be a JSON object".to_string()));
    };
    let mut merged = match serde_json::to_value(existing)? {
        Value::Object(fields) => fields,
        _ => return Err(StoreError::Invalid("stored survey is not an object".to_string())),
    };
    for (key, value) in patch {
        if key == "id" || key == "createdAt" {
            continue;
        }
        merged.insert(key, value);
    }
    merged.insert("updatedAt".to_string(), Value::String(now_string()));
    definition_from_value(Value::Object(merged)).map_err(|e| StoreError::Invalid(e.to_string()))
}
