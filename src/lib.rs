pub mod cli;
pub mod compile;
pub mod render;
pub mod runtime;
pub mod service;
pub mod settings;
pub mod store;
pub mod survey;
pub mod util;

pub use compile::{compile, Bundle, CompileError};
pub use service::SurveyService;
pub use settings::GeneratorSettings;
pub use survey::SurveyDefinition;
