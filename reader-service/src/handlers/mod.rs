//! HTTP handlers for the reader service.

pub mod chat;
pub mod define;
pub mod health;
pub mod metrics;
pub mod translate;
pub mod upload;

pub use chat::chat;
pub use define::define_word;
pub use health::{health_check, readiness_check};
pub use translate::translate_text;
pub use upload::upload_file;
