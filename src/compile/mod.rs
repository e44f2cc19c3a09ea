pub mod behavior;
pub mod bundle;
pub mod error;
pub mod steps;
pub mod stylesheet;
pub mod widget;

use crate::render::templates::OverlayTemplates;
use crate::settings::GeneratorSettings;
use crate::survey::normalize::resolve;
use crate::survey::types::SurveyDefinition;

pub use bundle::Bundle;
pub use error::CompileError;

/// Compiles one survey definition into an overlay bundle.
///
/// Pure with respect to its inputs: nothing is logged, cached or mutated, so
/// independent definitions can be compiled from any number of threads.
pub fn compile(def: &SurveyDefinition, settings: &GeneratorSettings) -> Result<Bundle, CompileError> {
    let templates = OverlayTemplates::for_settings(settings)?;
    compile_with(&templates, def, settings)
}

/// Same as [`compile`] with an already loaded template set.
pub fn compile_with(
    templates: &OverlayTemplates,
    def: &SurveyDefinition,
    settings: &GeneratorSettings,
) -> Result<Bundle, CompileError> {
    let survey = resolve(def)?;
    bundle::assemble(templates, &survey, settings)
}
