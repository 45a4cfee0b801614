//! Prompt builder: optional topic context block + the user question.

use crate::core::models::topic::Topic;

const PREAMBLE: &str = "You are an AI-powered personal learning assistant.\n\
                        Here are the user's current learning topics:\n";

const INSTRUCTION: &str =
    "Now, answer this user question with helpful, easy-to-understand information.\n";

/// Build the prompt sent to the model.
///
/// Without topics the question is passed through verbatim. With topics, each
/// one becomes a `- title (status): description` line, in input order,
/// wrapped by a fixed instruction.
///
/// # Example
/// ```ignore
/// let prompt = build_prompt("What is a trait?", &[]);
/// assert_eq!(prompt, "What is a trait?");
/// ```
pub fn build_prompt(question: &str, topics: &[Topic]) -> String {
    if topics.is_empty() {
        return question.to_string();
    }

    let context = topics
        .iter()
        .map(|t| format!("- {} ({}): {}", t.title, t.status, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{PREAMBLE}{context}\n\n{INSTRUCTION}User question: {question}")
}
