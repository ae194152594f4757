use super::*;

#[test]
fn test_fenced_javascript_block() {
    let raw = "```javascript\ndocument.title = 'x';\n```";
    assert_eq!(extract_code(raw).unwrap(), "document.title = 'x';");
}

#[test]
fn test_fenced_js_and_unlabelled_blocks() {
    assert_eq!(extract_code("```js\nalert(1);\n```").unwrap(), "alert(1);");
    assert_eq!(extract_code("```\nalert(2);\n```").unwrap(), "alert(2);");
}

#[test]
fn test_fence_with_other_label() {
    let raw = "```typescript\nconst n: number = 1;\n```";
    assert_eq!(extract_code(raw).unwrap(), "const n: number = 1;");
}

#[test]
fn test_inline_fence_keeps_first_token() {
    assert_eq!(take_first_fence("```alert('hi')```"), "alert('hi')");
    assert_eq!(take_first_fence("```js alert('hi')```"), "alert('hi')");
}

#[test]
fn test_first_fence_wins() {
    let raw = "First:\n```js\nconsole.log(1);\n```\nOr:\n```js\nconsole.log(2);\n```";
    assert_eq!(extract_code(raw).unwrap(), "console.log(1);");
}

#[test]
fn test_unclosed_fence() {
    let raw = "```javascript\nconst items = document.querySelectorAll('li');";
    assert_eq!(
        extract_code(raw).unwrap(),
        "const items = document.querySelectorAll('li');"
    );
}

#[test]
fn test_no_fence_returns_trimmed_text() {
    let raw = "\n\n  document.body.innerHTML = '';  \n";
    assert_eq!(extract_code(raw).unwrap(), "document.body.innerHTML = '';");
}

#[test]
fn test_on_device_background_example() {
    let raw = "```javascript\ndocument.body.style.backgroundColor='#00f';\n```";
    assert_eq!(
        extract_code(raw).unwrap(),
        "document.body.style.backgroundColor='#00f';"
    );
}

#[test]
fn test_empty_output_is_rejected() {
    assert!(matches!(extract_code(""), Err(CoreError::InvalidCode)));
    assert!(matches!(extract_code("   \n\t"), Err(CoreError::InvalidCode)));
    assert!(matches!(extract_code("```js\n```"), Err(CoreError::InvalidCode)));
}

#[test]
fn test_too_short_output_is_rejected() {
    assert!(matches!(extract_code("x=1"), Err(CoreError::InvalidCode)));
    assert!(matches!(extract_code("a = b"), Err(CoreError::InvalidCode)));
    assert!(extract_code("x = 123").is_ok());
}

#[test]
fn test_strip_leading_acknowledgement() {
    let text = "Sure! Here is the code\ndocument.title = 'done';";
    assert_eq!(strip_chatter(text), "document.title = 'done';");

    let text = "Here's a script that hides images:\n\ndocument.querySelectorAll('img').forEach(i => i.remove());";
    assert_eq!(
        strip_chatter(text),
        "document.querySelectorAll('img').forEach(i => i.remove());"
    );
}

#[test]
fn test_strip_trailing_explanation() {
    let text = "const links = document.links;\nconsole.log(links.length);\n\nThis code counts the links on the page.\nIt logs the result.";
    assert_eq!(
        strip_chatter(text),
        "const links = document.links;\nconsole.log(links.length);"
    );

    let text = "alert('hello');\nNote: pop-ups may be blocked.";
    assert_eq!(strip_chatter(text), "alert('hello');");
}

#[test]
fn test_indented_lines_are_not_explanations() {
    let text = "function f() {\n  this.code = 1;\n}\nf();";
    assert_eq!(strip_chatter(text), text);
}

#[test]
fn test_code_lines_are_not_acknowledgements() {
    let text = "ok();\nconsole.log('x');";
    assert_eq!(strip_chatter(text), text);
}

#[test]
fn test_identifiers_starting_with_acknowledgement_words_are_kept() {
    let raw = "okCount = document.images.length\nconsole.log(okCount)";
    assert_eq!(extract_code(raw).unwrap(), raw);

    let text = "surely\nconsole.log(surely)";
    assert_eq!(strip_chatter(text), text);
}

#[test]
fn test_assignment_without_semicolon_is_code() {
    let text = "ok = true\nconsole.log(ok)";
    assert_eq!(strip_chatter(text), text);
}

#[test]
fn test_strip_quote_markers() {
    let text = "> const a = 1;\n> console.log(a);";
    assert_eq!(strip_quote_markers(text), "const a = 1;\nconsole.log(a);");
}

#[test]
fn test_partial_quote_markers_are_kept() {
    let text = "const big = a\n> b;";
    assert_eq!(strip_quote_markers(text), text);
}

#[test]
fn test_pipeline_order_fence_before_chatter() {
    let raw = "  Sure, here you go:\n```js\ndocument.body.style.color = 'red';\n```\nThis code turns the text red.  ";
    assert_eq!(
        extract_code(raw).unwrap(),
        "document.body.style.color = 'red';"
    );
}

#[test]
fn test_chatter_only_is_rejected() {
    assert!(matches!(
        extract_code("Sure, here is the code:"),
        Err(CoreError::InvalidCode)
    ));
}
