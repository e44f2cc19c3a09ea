use tera::Context;

use crate::render::templates::{OverlayTemplates, STYLESHEET};
use crate::survey::types::Theme;
use crate::util::text::font_stack;

use super::error::CompileError;

/// Renders the overlay stylesheet. Color tokens are inserted verbatim; the
/// caller owns their CSS validity.
pub fn build_stylesheet(
    templates: &OverlayTemplates,
    theme: &Theme,
    z_index: &str,
) -> Result<String, CompileError> {
    let mut ctx = Context::new();
    ctx.insert("theme", theme);
    ctx.insert("font_stack", &font_stack(&theme.font_family));
    ctx.insert("z_index", z_index);
    templates.render(STYLESHEET, &ctx)
}
