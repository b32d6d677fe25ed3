//! Prompt composer: renders facts and a tone into the recap generation prompt.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::recap::relevance::filter_relevant_statistics;
use crate::recap::Fact;

/// Tone used when the caller does not ask for one.
pub const DEFAULT_TONE: &str = "neutral, ESPN-style";

/// Opening instruction of every recap prompt.
pub const RECAP_PREAMBLE: &str = "Write a professional NBA recap paragraph.";

/// Renders the prompt for an already extracted fact list.
///
/// Each fact becomes a `- ` bullet in insertion order. The tone is passed
/// through untouched.
pub fn compose_prompt(facts: &[Fact], tone: &str) -> String {
    let facts_section = facts
        .iter()
        .map(|fact| format!("- {fact}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{RECAP_PREAMBLE}\n\nFacts:\n{facts_section}\n\nTone: {tone}")
}

/// Filters a raw box score and renders its prompt.
pub fn generate_prompt(record: &Value, tone: &str) -> String {
    compose_prompt(&filter_relevant_statistics(record), tone)
}

/// Reads a box-score JSON file and renders its prompt.
pub fn prompt_from_file(path: &Path, tone: &str) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read box score file {}", path.display()))?;
    let record: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Box score file {} is not valid JSON", path.display()))?;
    Ok(generate_prompt(&record, tone))
}
