use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub error: bool,
    /// Paragraphs in document order.
    pub content: Vec<String>,
}

impl UploadResponse {
    pub fn new(content: Vec<String>) -> Self {
        Self {
            error: false,
            content,
        }
    }
}
