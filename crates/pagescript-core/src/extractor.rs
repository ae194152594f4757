//! Normalization of raw model text into runnable source.
//!
//! The pipeline runs these steps in order, each a pure `&str -> String`:
//!
//! 1. [`trim`]
//! 2. [`take_first_fence`] - the first fenced block wins, whatever its label
//! 3. [`strip_chatter`] - leading acknowledgements, trailing explanations
//! 4. [`strip_quote_markers`] - `> ` prefixes of a quoted block
//!
//! A result with fewer than [`MIN_CODE_CHARS`] non-whitespace characters is
//! rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum non-whitespace characters of extracted code.
pub const MIN_CODE_CHARS: usize = 5;

// Label is consumed only when it ends the fence line, so ```alert(1)``` keeps
// its first token.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:[\w+#.-]*[^\S\n]*\n|(?:javascript|js)\b)?([\s\S]*?)```")
        .expect("fence regex is a compile-time constant")
});

static UNCLOSED_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```[\w+#.-]*[^\S\n]*\n([\s\S]*)$").expect("fence regex is a compile-time constant")
});

static ACKNOWLEDGEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:sure|certainly|of course|okay|ok|absolutely|here(?:'s| is| are)|below is|the following|i(?:'ve| have) (?:written|created))\b|はい|以下|こちら)",
    )
    .expect("acknowledgement regex is a compile-time constant")
});

static EXPLANATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:this (?:code|script|snippet)|the (?:code|script) above|explanation:|note:|notes:|how it works|このコード|説明|注意)",
    )
    .expect("explanation regex is a compile-time constant")
});

/// Run the full pipeline.
pub fn extract_code(raw: &str) -> Result<String, CoreError> {
    let steps: [fn(&str) -> String; 4] = [trim, take_first_fence, strip_chatter, strip_quote_markers];
    let code = steps.iter().fold(raw.to_string(), |text, step| step(&text));

    if code.chars().filter(|c| !c.is_whitespace()).count() < MIN_CODE_CHARS {
        return Err(CoreError::InvalidCode);
    }
    Ok(code)
}

/// Step 1.
pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Step 2: content of the first fenced block, trimmed. Text without a fence is
/// returned unchanged; an opening fence that never closes keeps everything
/// after it.
pub fn take_first_fence(text: &str) -> String {
    if let Some(cap) = FENCE.captures(text) {
        return cap[1].trim().to_string();
    }
    if let Some(cap) = UNCLOSED_FENCE.captures(text) {
        return cap[1].trim().to_string();
    }
    text.to_string()
}

/// Step 3: drop conversational lines before the code and the explanation
/// after it.
pub fn strip_chatter(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let start = lines
        .iter()
        .position(|line| {
            let line = line.trim();
            !line.is_empty() && !is_acknowledgement(line)
        })
        .unwrap_or(lines.len());

    let mut end = lines.len();
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        // Explanations start at column 0; indented lines belong to the code.
        if !line.starts_with(char::is_whitespace) && EXPLANATION.is_match(line) {
            end = idx;
            break;
        }
    }

    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n").trim().to_string()
}

/// Step 4: remove `>` markers when every non-empty line carries one.
pub fn strip_quote_markers(text: &str) -> String {
    let quoted = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.trim_start().starts_with('>'));
    if !quoted || text.trim().is_empty() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_acknowledgement(line: &str) -> bool {
    if ACKNOWLEDGEMENT.is_match(line) && !looks_like_code(line) {
        return true;
    }
    // "Here's the script:" style lead-ins without a known opener.
    line.ends_with(':') && !looks_like_code(line) && line.contains(' ')
}

fn looks_like_code(line: &str) -> bool {
    line.starts_with("//")
        || line.starts_with("/*")
        || line.contains(';')
        || line.contains('{')
        || line.contains('}')
        || line.contains("=>")
        || line.contains(" = ")
        || line.contains('(') && line.contains(')')
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
