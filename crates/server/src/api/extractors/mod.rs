//! Custom extractors and validation rules.

mod params;
pub mod rules;
mod validated_json;

pub use params::{AppPath, AppQuery};
pub use validated_json::ValidatedJson;
