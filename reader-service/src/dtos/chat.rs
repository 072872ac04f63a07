use serde::{Deserialize, Serialize};

/// All fields are optional on the wire and default to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub selected_text: String,
    pub book_context: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub error: bool,
    pub message: String,
}

impl ChatResponse {
    pub fn new(message: String) -> Self {
        Self {
            error: false,
            message,
        }
    }
}
