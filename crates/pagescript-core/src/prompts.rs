//! Fixed prompts sent to the language model.

/// System prompt for code generation.
pub const CODE_SYSTEM_PROMPT: &str = "\
You are an expert at writing JavaScript that runs inside web pages.
Write JavaScript that carries out the user's instruction on the current page.

Rules:
1. Output plain JavaScript only, no explanations and no markdown.
2. The code must be immediately executable as a function body.
3. Use browser APIs such as document and window.
4. Include error handling.
5. Report the outcome with console.log or by changing the page visibly.
6. Do not wrap the code in code fences (```).

Example:
Instruction: set the page background to blue
Output:
document.body.style.backgroundColor = '#0066cc';
console.log('Background color changed to blue');";

/// Wrap a user instruction for code generation.
pub fn code_instruction(prompt: &str) -> String {
    format!(
        "Instruction: {}\n\nOutput only JavaScript code:",
        prompt.trim()
    )
}

/// System prompt for page summaries in a fixed output language.
pub fn summary_system_prompt(language: &str) -> String {
    format!(
        "You summarize web pages. Always answer in {language}, whatever language the page is written in.\n\
         Use exactly this layout:\n\
         Overview: <one sentence>\n\
         Points:\n\
         - <point>\n\
         (3 to 5 points)\n\
         Keywords: <comma-separated keywords>"
    )
}

/// Wrap extracted page text for summarization.
pub fn summary_instruction(title: Option<&str>, text: &str) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => {
            format!("Summarize this page.\n\nTitle: {}\n\n{}", title.trim(), text)
        }
        _ => format!("Summarize this page.\n\n{}", text),
    }
}
