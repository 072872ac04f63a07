use crate::services::lexicon::Sense;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct DefineRequest {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefinitionResponse {
    pub error: bool,
    pub definition: String,
    pub examples: Vec<String>,
}

impl From<Sense> for DefinitionResponse {
    fn from(sense: Sense) -> Self {
        Self {
            error: false,
            definition: sense.definition,
            examples: sense.examples,
        }
    }
}
