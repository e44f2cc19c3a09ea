use serde_json::Value;

use crate::compile::error::CompileError;

use super::types::SurveyDefinition;

pub fn parse_definition(raw: &str) -> Result<SurveyDefinition, CompileError> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| CompileError::Malformed(format!("invalid JSON: {e}")))?;
    definition_from_value(root)
}

/// Checks the shape of a raw document before handing it to serde so callers
/// get the 1-based question position in the error instead of a byte offset.
pub fn definition_from_value(root: Value) -> Result<SurveyDefinition, CompileError> {
    if !root.is_object() {
        return Err(CompileError::Malformed(
            "survey definition must be a JSON object".to_string(),
        ));
    }

    if let Some(questions) = root.get("questions") {
        let list = questions.as_array().ok_or_else(|| {
            CompileError::Malformed("'questions' must be an array".to_string())
        })?;
        for (index, question) in list.iter().enumerate() {
            let position = index + 1;
            if !question.is_object() {
                return Err(CompileError::InvalidDefinition {
                    position,
                    reason: "question must be an object".to_string(),
                });
            }
            if question.get("type").and_then(Value::as_str).is_none() {
                return Err(CompileError::InvalidDefinition {
                    position,
                    reason: "question has no 'type'".to_string(),
                });
            }
        }
    }

    serde_json::from_value(root).map_err(|e| CompileError::Malformed(e.to_string()))
}
