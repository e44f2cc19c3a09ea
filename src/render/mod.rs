pub mod helpers;
pub mod templates;
