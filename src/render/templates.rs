use std::path::Path;

use tera::{Context, Tera};

use crate::compile::error::CompileError;
use crate::settings::GeneratorSettings;

pub const DOCUMENT: &str = "document.html.tera";
pub const STAR_STEP: &str = "step_star.html.tera";
pub const TEXT_STEP: &str = "step_text.html.tera";
pub const THANK_YOU: &str = "thank_you.html.tera";
pub const STYLESHEET: &str = "stylesheet.css.tera";

const REQUIRED_PARTIALS: &[&str] = &[DOCUMENT, STAR_STEP, TEXT_STEP, THANK_YOU, STYLESHEET];

const BUILTIN: &[(&str, &str)] = &[
  ("overlay/document.html.tera", include_str!("../../templates/overlay/document.html.tera")),
  ("overlay/step_star.html.tera", include_str!("../../templates/overlay/step_star.html.tera")),
  ("overlay/step_text.html.tera", include_str!("../../templates/overlay/step_text.html.tera")),
  ("overlay/thank_you.html.tera", include_str!("../../templates/overlay/thank_you.html.tera")),
  ("overlay/stylesheet.css.tera", include_str!("../../templates/overlay/stylesheet.css.tera")),
];

/// The overlay template set: built in, or loaded from `templateDir`.
pub struct OverlayTemplates {
  tera: Tera,
}

impl OverlayTemplates {
  pub fn builtin() -> Result<Self, CompileError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN.to_vec())?;
    Self::finish(tera)
  }

  pub fn from_dir(template_root: &Path) -> Result<Self, CompileError> {
    let pattern = format!("{}/**/*.tera", template_root.display());
    let tera = Tera::new(&pattern)?;
    Self::finish(tera)
  }

  pub fn for_settings(settings: &GeneratorSettings) -> Result<Self, CompileError> {
    match settings.template_dir.as_deref() {
      Some(dir) if !dir.trim().is_empty() => Self::from_dir(Path::new(dir)),
      _ => Self::builtin(),
    }
  }

  fn finish(mut tera: Tera) -> Result<Self, CompileError> {
    // markup partials escape, the stylesheet passes theme tokens through verbatim
    tera.autoescape_on(vec![".html.tera"]);
    let templates = Self { tera };
    for partial in REQUIRED_PARTIALS {
      templates.resolve_name(partial)?;
    }
    Ok(templates)
  }

  fn resolve_name(&self, partial: &str) -> Result<String, CompileError> {
    self
      .tera
      .get_template_names()
      .find(|name| name.ends_with(partial))
      .map(|name| name.to_string())
      .ok_or_else(|| {
        CompileError::Template(format!("Template '{partial}' not found in loaded template set."))
      })
  }

  pub fn render(&self, partial: &str, ctx: &Context) -> Result<String, CompileError> {
    let name = self.resolve_name(partial)?;
    Ok(self.tera.render(&name, ctx)?)
  }
}
