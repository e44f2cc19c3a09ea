use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::compile::{compile_with, Bundle, CompileError};
use crate::render::templates::OverlayTemplates;
use crate::settings::GeneratorSettings;
use crate::store::{StoreError, SurveyRepository};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// CRUD and generation over a survey repository. Every public operation
/// answers with a `{ success, ... }` envelope; failures never escape as `Err`.
pub struct SurveyService {
    repo: Box<dyn SurveyRepository>,
    settings: GeneratorSettings,
    templates: OverlayTemplates,
}

impl SurveyService {
    pub fn new(
        repo: Box<dyn SurveyRepository>,
        settings: GeneratorSettings,
    ) -> Result<Self, CompileError> {
        let templates = OverlayTemplates::for_settings(&settings)?;
        Ok(Self {
            repo,
            settings,
            templates,
        })
    }

    pub fn create(&self, body: Value) -> Value {
        envelope(self.repo.create(body).and_then(|survey| {
            info!(survey_id = %survey.id, "survey created");
            Ok(json!({
                "success": true,
                "surveyId": survey.id,
                "survey": serde_json::to_value(&survey)?,
            }))
        }))
    }

    pub fn get(&self, id: &str) -> Value {
        envelope(self.repo.get_by_id(id).and_then(|survey| {
            Ok(json!({ "success": true, "survey": serde_json::to_value(&survey)? }))
        }))
    }

    pub fn list(&self) -> Value {
        envelope(self.repo.list().and_then(|surveys| {
            Ok(json!({ "success": true, "surveys": serde_json::to_value(&surveys)? }))
        }))
    }

    pub fn update(&self, id: &str, patch: Value) -> Value {
        envelope(self.repo.update(id, patch).and_then(|survey| {
            info!(survey_id = %survey.id, "survey updated");
            Ok(json!({ "success": true, "survey": serde_json::to_value(&survey)? }))
        }))
    }

    pub fn delete(&self, id: &str) -> Value {
        envelope(self.repo.delete(id).map(|()| {
            info!(survey_id = %id, "survey deleted");
            json!({ "success": true })
        }))
    }

    pub fn generate(&self, id: &str) -> Value {
        envelope(
            self.generate_bundle(id)
                .map(|bundle| json!({ "success": true, "code": bundle.html })),
        )
    }

    /// Compiles the stored survey `id` with the service's template set.
    pub fn generate_bundle(&self, id: &str) -> Result<Bundle, ServiceError> {
        let survey = self.repo.get_by_id(id)?;
        let bundle = compile_with(&self.templates, &survey, &self.settings)?;
        info!(survey_id = %id, sha256 = %bundle.sha256, "overlay generated");
        Ok(bundle)
    }
}

fn envelope<E>(result: Result<Value, E>) -> Value
where
    E: std::fmt::Display,
{
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "survey operation failed");
            json!({ "success": false, "error": err.to_string() })
        }
    }
}
