//! Prompt assembly for the reading assistant.
//!
//! The model picks the answer mode (explanation, summary, translation, ...)
//! from the instructions below; this module only fills in the template.

/// Language used when the reader asks for a translation.
pub const TRANSLATION_LANGUAGE: &str = "Marathi";

const INSTRUCTIONS: &[&str] = &[
    "Please provide a helpful response about the selected text, taking into account the surrounding context from the book.",
    "If the user is asking about the meaning or interpretation, provide a clear explanation.",
    "If they're asking about facts or claims, verify them against the context.",
    "If they're asking about connections or implications, analyze them based on the provided context.",
    "If the user is asking about the author, provide a brief overview of the author's background and relevance to the text.",
    "If the user is asking for a translation, provide the translation in the {language} language.",
    "If the user is asking for a summary, provide a concise summary of the selected text.",
    "If the user is asking for a definition, provide the definition of the word in English.",
    "If the user is asking for examples, provide relevant examples from the text.",
    "If the user is asking for a comparison, provide a comparison with another text or concept.",
];

/// Inputs of one chat turn. Missing fields are empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatPrompt<'a> {
    pub selected_text: &'a str,
    pub book_context: &'a str,
    pub message: &'a str,
}

impl ChatPrompt<'_> {
    pub fn render(&self) -> String {
        let mut prompt = String::with_capacity(
            self.book_context.len() + self.selected_text.len() + self.message.len() + 1024,
        );

        prompt.push_str("Context from the book:\n");
        prompt.push_str(self.book_context);
        prompt.push_str("\n\nSelected text:\n\"");
        prompt.push_str(self.selected_text);
        prompt.push_str("\"\n\nUser question/message:\n");
        prompt.push_str(self.message);
        prompt.push_str("\n\n");

        for line in INSTRUCTIONS {
            prompt.push_str(&line.replace("{language}", TRANSLATION_LANGUAGE));
            prompt.push('\n');
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_all_three_inputs_in_order() {
        let prompt = ChatPrompt {
            selected_text: "It was the best of times",
            book_context: "A Tale of Two Cities, chapter 1",
            message: "What does this mean?",
        }
        .render();

        let context = prompt.find("A Tale of Two Cities").unwrap();
        let selected = prompt.find("\"It was the best of times\"").unwrap();
        let message = prompt.find("What does this mean?").unwrap();
        assert!(context < selected && selected < message);
    }

    #[test]
    fn empty_inputs_still_render_instructions() {
        let prompt = ChatPrompt::default().render();

        assert!(prompt.starts_with("Context from the book:\n"));
        assert!(prompt.contains("Selected text:\n\"\""));
        assert!(prompt.contains("translation in the Marathi language"));
        assert_eq!(prompt.lines().filter(|l| l.starts_with("If ")).count(), 9);
    }
}
