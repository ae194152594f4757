//! Page-side envelope for persistent registrations.
//!
//! CDP installs new-document scripts per page without URL filtering, so the
//! envelope checks the page URL against the registration's match patterns
//! and defers the script body to the requested lifecycle point.

use pagescript_protocols::{HostError, MatchPattern, RegisteredScript, RunAt};

/// Wrap a registration's source with its URL guard and run-at timing.
pub fn guarded_source(script: &RegisteredScript) -> Result<String, HostError> {
    if script.matches.is_empty() {
        return Err(HostError::Injection(format!(
            "registration {} has no match patterns",
            script.id
        )));
    }

    let patterns = script
        .matches
        .iter()
        .map(|m| {
            MatchPattern::parse(m)
                .map(|p| p.to_regex())
                .map_err(|e| HostError::Injection(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let patterns = serde_json::Value::from(patterns).to_string();

    let schedule = match script.run_at {
        RunAt::DocumentStart => "run();",
        RunAt::DocumentEnd => {
            "if (document.readyState === 'loading') {\n    document.addEventListener('DOMContentLoaded', run, { once: true });\n  } else {\n    run();\n  }"
        }
        RunAt::DocumentIdle => {
            "if (document.readyState === 'complete') {\n    run();\n  } else {\n    window.addEventListener('load', run, { once: true });\n  }"
        }
    };

    Ok(format!(
        "(() => {{\n  const href = location.href.split('#')[0];\n  if (window.top !== window) return;\n  if (!{patterns}.some((p) => new RegExp(p, 'i').test(href))) return;\n  const run = () => {{\n{source}\n  }};\n  {schedule}\n}})();",
        patterns = patterns,
        source = script.source,
        schedule = schedule,
    ))
}
