pub mod normalize;
pub mod parse;
pub mod types;

pub use types::{Question, QuestionType, ResolvedSurvey, SurveyDefinition};
