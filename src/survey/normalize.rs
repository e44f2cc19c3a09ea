use serde_json::Number;

use crate::compile::error::CompileError;

use super::types::{
    Question, QuestionType, ResolvedKind, ResolvedQuestion, ResolvedSurvey, ResolvedVideo,
    Styling, SurveyDefinition, Theme, ThankYou,
};

pub const DEFAULT_TITLE: &str = "Interactive Feedback Survey";
pub const DEFAULT_MAX_STARS: i64 = 5;
pub const MAX_STARS_LIMIT: i64 = 10;
pub const DEFAULT_PLACEHOLDER: &str = "Type your comments here";
pub const DEFAULT_START_TIME: u64 = 6;
pub const DEFAULT_END_TIME: u64 = 7;
pub const DEFAULT_CONTINUE_TIME: i64 = 8000;
pub const DEFAULT_THANK_YOU_MESSAGE: &str = "Thank you for your response!";
pub const DEFAULT_THANK_YOU_SUBTEXT: &str =
    "Your feedback helps us improve our content and services.";
pub const DEFAULT_THANK_YOU_DURATION_MS: u64 = 3000;

pub const DEFAULT_PRIMARY_COLOR: &str = "#002D72";
pub const DEFAULT_TEXT_COLOR: &str = "#3F3B3C";
pub const DEFAULT_BORDER_COLOR: &str = "#FFFFFF";
pub const DEFAULT_CARD_BACKGROUND: &str = "rgba(255, 255, 255, 0.7)";
pub const DEFAULT_FONT_FAMILY: &str = "Poppins";

pub fn resolve(def: &SurveyDefinition) -> Result<ResolvedSurvey, CompileError> {
    let questions = def
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| resolve_question(q, index + 1))
        .collect::<Result<Vec<ResolvedQuestion>, CompileError>>()?;

    let max_stars = match def.star_rating.max_stars.unwrap_or(DEFAULT_MAX_STARS) {
        n if n > MAX_STARS_LIMIT => {
            return Err(CompileError::Malformed(format!(
                "starRating.maxStars must be at most {MAX_STARS_LIMIT}, got {n}"
            )))
        }
        n => n.max(0) as u32,
    };

    let video = &def.video_config;
    Ok(ResolvedSurvey {
        title: non_blank(def.title.as_deref()).unwrap_or(DEFAULT_TITLE).to_string(),
        questions,
        max_stars,
        video: ResolvedVideo {
            host: video.host.clone(),
            video_id: video.video_id.clone(),
            start_time: video
                .start_time
                .clone()
                .unwrap_or_else(|| Number::from(DEFAULT_START_TIME)),
            end_time: video
                .end_time
                .clone()
                .unwrap_or_else(|| Number::from(DEFAULT_END_TIME)),
            continue_time: video.continue_time.unwrap_or(DEFAULT_CONTINUE_TIME),
            params: video.params.clone(),
        },
        theme: resolve_theme(&def.styling),
        thank_you: ThankYou {
            message: non_blank(def.thank_you_message.as_deref())
                .unwrap_or(DEFAULT_THANK_YOU_MESSAGE)
                .to_string(),
            subtext: non_blank(def.thank_you_subtext.as_deref())
                .unwrap_or(DEFAULT_THANK_YOU_SUBTEXT)
                .to_string(),
            duration_ms: def
                .thank_you_duration
                .unwrap_or(DEFAULT_THANK_YOU_DURATION_MS),
        },
    })
}

pub fn resolve_theme(styling: &Styling) -> Theme {
    let pick = |value: &Option<String>, fallback: &str| {
        non_blank(value.as_deref()).unwrap_or(fallback).to_string()
    };
    Theme {
        primary_color: pick(&styling.primary_color, DEFAULT_PRIMARY_COLOR),
        text_color: pick(&styling.text_color, DEFAULT_TEXT_COLOR),
        border_color: pick(&styling.border_color, DEFAULT_BORDER_COLOR),
        card_background: pick(&styling.card_background, DEFAULT_CARD_BACKGROUND),
        font_family: pick(&styling.font_family, DEFAULT_FONT_FAMILY),
    }
}

pub fn default_track_id(position: usize) -> String {
    format!("question_{position}_feedback")
}

pub fn default_track_name(kind: &QuestionType, position: usize) -> String {
    match kind {
        QuestionType::StarRating => format!("Question {position} Rating"),
        _ => format!("Question {position}"),
    }
}

fn resolve_question(q: &Question, position: usize) -> Result<ResolvedQuestion, CompileError> {
    let kind = match &q.kind {
        QuestionType::StarRating => ResolvedKind::StarRating,
        QuestionType::Text => ResolvedKind::Text {
            placeholder: non_blank(q.placeholder.as_deref())
                .unwrap_or(DEFAULT_PLACEHOLDER)
                .to_string(),
        },
        QuestionType::Unrecognized(raw) => {
            return Err(CompileError::InvalidDefinition {
                position,
                reason: format!("unrecognized question type '{raw}'"),
            })
        }
    };

    Ok(ResolvedQuestion {
        position,
        text: q.text.clone(),
        track_id: non_blank(q.track_id.as_deref())
            .map(|v| v.to_string())
            .unwrap_or_else(|| default_track_id(position)),
        track_name: non_blank(q.track_name.as_deref())
            .map(|v| v.to_string())
            .unwrap_or_else(|| default_track_name(&q.kind, position)),
        kind,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::types::{Question, SurveyDefinition};

    #[test]
    fn degenerate_definition_gets_safe_defaults() {
        let resolved = resolve(&SurveyDefinition::default()).expect("resolve");
        assert!(resolved.questions.is_empty());
        assert_eq!(resolved.max_stars, 5);
        assert_eq!(resolved.title, DEFAULT_TITLE);
        assert_eq!(resolved.theme.font_family, "Poppins");
        assert_eq!(resolved.theme.card_background, "rgba(255, 255, 255, 0.7)");
        assert_eq!(resolved.thank_you.duration_ms, 3000);
        assert_eq!(resolved.video.continue_time, 8000);
        assert_eq!(resolved.video.start_time, Number::from(6u64));
    }

    #[test]
    fn synthesizes_track_ids_from_position() {
        let mut def = SurveyDefinition::default();
        def.questions = vec![
            Question::star_rating("Quality?"),
            Question::text("Comments?", None),
            Question::star_rating("Again?").with_tracking("custom", "Custom Rating"),
        ];
        let resolved = resolve(&def).expect("resolve");
        assert_eq!(resolved.questions[0].track_id, "question_1_feedback");
        assert_eq!(resolved.questions[0].track_name, "Question 1 Rating");
        assert_eq!(resolved.questions[1].track_name, "Question 2");
        assert_eq!(
            resolved.questions[1].kind,
            ResolvedKind::Text { placeholder: DEFAULT_PLACEHOLDER.to_string() }
        );
        assert_eq!(resolved.questions[2].track_id, "custom");
        assert_eq!(resolved.questions[2].position, 3);
    }

    #[test]
    fn blank_styling_tokens_fall_back() {
        let styling = Styling {
            primary_color: Some("  ".to_string()),
            text_color: Some("#111".to_string()),
            ..Styling::default()
        };
        let theme = resolve_theme(&styling);
        assert_eq!(theme.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(theme.text_color, "#111");
    }

    #[test]
    fn negative_max_stars_clamps_to_zero() {
        let mut def = SurveyDefinition::default();
        def.star_rating.max_stars = Some(-3);
        assert_eq!(resolve(&def).expect("resolve").max_stars, 0);
    }

    #[test]
    fn max_stars_above_limit_is_rejected() {
        let mut def = SurveyDefinition::default();
        def.star_rating.max_stars = Some(MAX_STARS_LIMIT);
        assert_eq!(resolve(&def).expect("resolve").max_stars, 10);

        def.star_rating.max_stars = Some(i32::MAX as i64);
        match resolve(&def) {
            Err(CompileError::Malformed(message)) => assert!(message.contains("maxStars")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_question_type_is_rejected() {
        let mut def = SurveyDefinition::default();
        def.questions = vec![
            Question::star_rating("ok"),
            Question {
                kind: QuestionType::from("slider".to_string()),
                ..Question::star_rating("bad")
            },
        ];
        match resolve(&def) {
            Err(CompileError::InvalidDefinition { position, reason }) => {
                assert_eq!(position, 2);
                assert!(reason.contains("slider"));
            }
            other => panic!("expected InvalidDefinition, got {other:?}"),
        }
    }
}
