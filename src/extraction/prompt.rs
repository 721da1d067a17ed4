//! Prompt construction for extraction requests.

/// Keep at most `max_chars` characters of `text`, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Instructions asking for a title, a 100–150 word summary and 5–7 keywords
/// for the (truncated) text of `file_name`.
pub fn build_extraction_prompt(file_name: &str, text: &str, max_chars: usize) -> String {
    let body = truncate_chars(text, max_chars);
    format!(
        "Analyze the following text content from a file named \"{file_name}\".\n\
         1. Create a concise, descriptive title for this content.\n\
         2. Write a clear summary of the content, approximately 100-150 words long.\n\
         3. Generate an array of 5-7 relevant keywords that can be used to search for this document.\n\
         \n\
         Text Content:\n\
         ---\n\
         {body}\n\
         ---\n"
    )
}
