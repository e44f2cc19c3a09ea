use serde::Serialize;
use tera::Context;

use crate::render::templates::{OverlayTemplates, DOCUMENT};
use crate::runtime::script::RUNTIME_SCRIPT;
use crate::settings::GeneratorSettings;
use crate::survey::types::ResolvedSurvey;
use crate::util::hash::sha256_hex;

use super::behavior::{RuntimeManifest, ThankYouBehavior, Transition, THANK_YOU_STEP_ID};
use super::error::CompileError;
use super::steps::{build_steps, build_thank_you};
use super::stylesheet::build_stylesheet;
use super::widget::{build_widget_config, WidgetConfig};

/// A compiled overlay: one self-contained HTML document plus the structured
/// values embedded in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub html: String,
    pub manifest: RuntimeManifest,
    pub widget_config: WidgetConfig,
    pub sha256: String,
}

#[derive(Debug, Serialize)]
struct VideoView<'a> {
    host: &'a str,
    video_id: &'a str,
}

pub fn assemble(
    templates: &OverlayTemplates,
    survey: &ResolvedSurvey,
    settings: &GeneratorSettings,
) -> Result<Bundle, CompileError> {
    let records = build_steps(templates, &survey.questions, survey.max_stars)?;
    let initial = Transition::initial(records.len());
    let thank_you_markup =
        build_thank_you(templates, &survey.thank_you, initial == Transition::ThankYou)?;

    let mut step_markup = Vec::with_capacity(records.len());
    let mut steps = Vec::with_capacity(records.len());
    for record in records {
        step_markup.push(record.markup);
        steps.push(record.behavior);
    }

    let manifest = RuntimeManifest {
        callback: settings.callback_name.clone(),
        initial,
        steps,
        thank_you: ThankYouBehavior {
            step_id: THANK_YOU_STEP_ID.to_string(),
            duration_ms: survey.thank_you.duration_ms,
            transition_delay_ms: settings.transition_delay_ms,
            continue_time: survey.video.continue_time,
        },
    };
    let widget_config = build_widget_config(survey, settings);
    let stylesheet = build_stylesheet(templates, &survey.theme, &settings.z_index)?;

    let mut ctx = Context::new();
    ctx.insert("title", &survey.title);
    ctx.insert("icon_stylesheet_url", &settings.icon_stylesheet_url);
    ctx.insert("player_script_url", &settings.player_script_url);
    ctx.insert("stylesheet", &stylesheet);
    ctx.insert(
        "video",
        &VideoView {
            host: &survey.video.host,
            video_id: &survey.video.video_id,
        },
    );
    // serialized here and escaped by the template, so the runtime can
    // JSON.parse the attribute value as-is
    ctx.insert("video_params_json", &serde_json::to_string(&survey.video.params)?);
    ctx.insert("widget_config_json", &serde_json::to_string(&widget_config)?);
    ctx.insert("manifest_json", &serde_json::to_string(&manifest)?);
    ctx.insert("step_markup", &step_markup);
    ctx.insert("thank_you_markup", &thank_you_markup);
    ctx.insert("runtime_script", RUNTIME_SCRIPT);

    let html = templates.render(DOCUMENT, &ctx)?;
    let sha256 = sha256_hex(html.as_bytes());
    Ok(Bundle {
        html,
        manifest,
        widget_config,
        sha256,
    })
}
