//! Truncation of page text and parsing of summary output.

use pagescript_protocols::PageSummary;

/// Start of the marker appended to truncated page text.
pub const TRUNCATION_MARKER: &str = "[Content truncated";

/// Cut text to at most `max_chars` characters, appending a marker when
/// anything was dropped.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!(
        "{}\n\n{}: showing the first {} of {} characters]",
        kept.trim_end(),
        TRUNCATION_MARKER,
        max_chars,
        total
    )
}

/// Best-effort parse of `Overview / Points / Keywords` output.
///
/// Missing sections stay empty; without an `Overview:` label the first plain
/// line is used. `raw` always holds the full text.
pub fn parse_summary(raw: &str) -> PageSummary {
    let mut summary = PageSummary {
        raw: raw.trim().to_string(),
        ..PageSummary::default()
    };
    let mut first_plain: Option<String> = None;

    for line in raw.lines() {
        let line = clean(line);
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = strip_label(&line, &["overview", "summary", "概要"]) {
            if !rest.is_empty() {
                summary.overview = rest.to_string();
            }
        } else if let Some(rest) = strip_label(&line, &["keywords", "keyword", "キーワード"]) {
            summary.keywords.extend(
                rest.split([',', '、', ';'])
                    .map(|k| k.trim().trim_start_matches('#').trim())
                    .filter(|k| !k.is_empty())
                    .map(str::to_string),
            );
        } else if strip_label(&line, &["points", "key points", "要点"]).is_some() {
            continue;
        } else if let Some(point) = bullet(&line) {
            summary.points.push(point.to_string());
        } else if summary.overview.is_empty() && first_plain.is_none() {
            first_plain = Some(line.clone());
        }
    }

    if summary.overview.is_empty() {
        summary.overview = first_plain.unwrap_or_default();
    }
    summary
}

/// Drop markdown emphasis and heading markers around a line.
fn clean(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .trim()
        .replace("**", "")
        .replace("__", "")
}

fn strip_label<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    let (head, rest) = line.split_once([':', '：'])?;
    let head = head.trim().to_lowercase();
    labels
        .iter()
        .any(|label| head == *label)
        .then(|| rest.trim())
}

fn bullet(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• ", "・"] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some(rest.trim());
        }
    }
    None
}
