use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::settings::GeneratorSettings;
use crate::survey::types::ResolvedSurvey;
use crate::util::text::primary_font_family;

pub const OVERLAY_TEMPLATE_SELECTOR: &str = "#survey-feedback-container";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupEntry {
    pub start_time: Number,
    pub end_time: Number,
    pub template: String,
    #[serde(rename = "z-index")]
    pub z_index: String,
    pub callback: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleFont {
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontEntry {
    pub name: String,
    pub url: String,
    pub google: GoogleFont,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryList<T> {
    pub list: Vec<T>,
}

/// Host-player activation config: when to inject the overlay and which font
/// to preload. The runtime script never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub markup: EntryList<MarkupEntry>,
    pub fontloader: EntryList<FontEntry>,
}

pub fn build_widget_config(survey: &ResolvedSurvey, settings: &GeneratorSettings) -> WidgetConfig {
    WidgetConfig {
        markup: EntryList {
            list: vec![MarkupEntry {
                start_time: survey.video.start_time.clone(),
                end_time: survey.video.end_time.clone(),
                template: OVERLAY_TEMPLATE_SELECTOR.to_string(),
                z_index: settings.z_index.clone(),
                callback: settings.callback_name.clone(),
                action: "pause".to_string(),
            }],
        },
        fontloader: EntryList {
            list: vec![FontEntry {
                name: primary_font_family(&survey.theme.font_family),
                url: String::new(),
                google: GoogleFont {
                    styles: settings.font_styles.clone(),
                },
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::normalize::resolve;
    use crate::survey::types::SurveyDefinition;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_host_shape() {
        let mut def = SurveyDefinition::default();
        def.video_config.start_time = Some(Number::from(12));
        def.video_config.end_time = Some(Number::from(14));
        def.styling.font_family = Some("'Open Sans', sans-serif".to_string());
        let survey = resolve(&def).expect("resolve");
        let config = build_widget_config(&survey, &GeneratorSettings::default());
        assert_eq!(
            serde_json::to_value(&config).expect("json"),
            serde_json::json!({
                "markup": {"list": [{
                    "start_time": 12,
                    "end_time": 14,
                    "template": "#survey-feedback-container",
                    "z-index": "1000",
                    "callback": "survey-feedback-callback",
                    "action": "pause"
                }]},
                "fontloader": {"list": [{
                    "name": "Open Sans",
                    "url": "",
                    "google": {"styles": ["300", "400", "500", "700"]}
                }]}
            })
        );
    }
}
