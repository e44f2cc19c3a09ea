use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    StarRating,
    Text,
    Unrecognized(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StarRating => "star-rating",
            Self::Text => "text",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "star-rating" => Self::StarRating,
            "text" => Self::Text,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Question {
    pub fn star_rating(text: &str) -> Self {
        Self {
            kind: QuestionType::StarRating,
            text: text.to_string(),
            track_id: None,
            track_name: None,
            placeholder: None,
        }
    }

    pub fn text(text: &str, placeholder: Option<&str>) -> Self {
        Self {
            kind: QuestionType::Text,
            text: text.to_string(),
            track_id: None,
            track_name: None,
            placeholder: placeholder.map(|p| p.to_string()),
        }
    }

    pub fn with_tracking(mut self, track_id: &str, track_name: &str) -> Self {
        self.track_id = Some(track_id.to_string());
        self.track_name = Some(track_name.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRatingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stars: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_time: Option<i64>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Survey definition as stored and exchanged with the editor.
///
/// Every field except `id` is optional on the wire; the compiler resolves
/// missing values through [`crate::survey::normalize::resolve`]. Fields the
/// model does not know about are kept in `extra` so stored documents
/// round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub star_rating: StarRatingConfig,
    #[serde(default)]
    pub video_config: VideoConfig,
    #[serde(default)]
    pub styling: Styling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thank_you_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thank_you_subtext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thank_you_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolved styling tokens, serialized with Rust field names; the stylesheet
/// template reads them as `theme.<field>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub primary_color: String,
    pub text_color: String,
    pub border_color: String,
    pub card_background: String,
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ResolvedKind {
    #[serde(rename = "star-rating")]
    StarRating,
    #[serde(rename = "text")]
    Text { placeholder: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuestion {
    pub position: usize,
    pub text: String,
    pub track_id: String,
    pub track_name: String,
    #[serde(flatten)]
    pub kind: ResolvedKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVideo {
    pub host: String,
    pub video_id: String,
    pub start_time: Number,
    pub end_time: Number,
    pub continue_time: i64,
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYou {
    pub message: String,
    pub subtext: String,
    pub duration_ms: u64,
}

/// Fully defaulted view of a [`SurveyDefinition`]; generators only read this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSurvey {
    pub title: String,
    pub questions: Vec<ResolvedQuestion>,
    pub max_stars: u32,
    pub video: ResolvedVideo,
    pub theme: Theme,
    pub thank_you: ThankYou,
}
