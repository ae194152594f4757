//! Page summary.

use serde::{Deserialize, Serialize};

/// Structured page summary. `raw` always holds the full model output;
/// the other fields are filled best-effort from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub overview: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub raw: String,
}
