pub mod chat;
pub mod define;
pub mod upload;

pub use chat::{ChatRequest, ChatResponse};
pub use define::{DefineRequest, DefinitionResponse};
pub use upload::UploadResponse;
