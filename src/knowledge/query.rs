//! Retrieval-augmented answering over a selected article.

use crate::error::ModelError;
use crate::extraction::Generator;

const NO_CONTEXT: &str = "No specific information was found in the knowledge base.";

/// Wrap `question` with `context` and an instruction to admit when the context
/// does not contain the answer.
pub fn build_answer_prompt(question: &str, context: &str) -> String {
    let context = if context.trim().is_empty() { NO_CONTEXT } else { context };
    format!(
        "Based on the following information from our knowledge base, please answer the user's \
         question. If the information doesn't contain the answer, say that you couldn't find \
         relevant information.\n\
         \n\
         ---\n\
         Knowledge Base Information:\n\
         {context}\n\
         ---\n\
         \n\
         User's Question:\n\
         {question}"
    )
}

/// Ask `generator` to answer `question` from `context` (usually an article's content).
pub async fn answer(
    generator: &dyn Generator,
    question: &str,
    context: &str,
) -> Result<String, ModelError> {
    tracing::info!(question_len = question.len(), context_len = context.len(), "answering from knowledge base");
    generator.generate(&build_answer_prompt(question, context)).await
}
