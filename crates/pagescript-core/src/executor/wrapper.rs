//! JavaScript envelopes around user code.

/// Function declaration called with the user code as its only argument.
///
/// Builds a function from the code, awaits it and reports
/// `{success, result}` or `{success: false, error}`. Exceptions never escape.
pub const USER_CODE_WRAPPER: &str = r#"async function (code) {
  try {
    const fn = new Function(code);
    const result = await fn();
    return { success: true, result: result === undefined ? null : result };
  } catch (error) {
    return {
      success: false,
      error: error instanceof Error ? error.message : String(error),
    };
  }
}"#;

/// Self-running source for a persistent registration.
///
/// The code is embedded as a JSON string literal. The outcome goes to the
/// page console since nothing is waiting for a return value.
pub fn registration_source(code: &str) -> String {
    let literal = serde_json::Value::String(code.to_string()).to_string();
    format!(
        "(async () => {{\n  const outcome = await ({wrapper})({literal});\n  if (outcome.success) {{\n    console.log('[pagescript]', outcome.result);\n  }} else {{\n    console.error('[pagescript]', outcome.error);\n  }}\n}})();",
        wrapper = USER_CODE_WRAPPER,
        literal = literal,
    )
}
