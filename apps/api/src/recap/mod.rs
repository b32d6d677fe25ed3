// Recap pipeline: box score → relevant facts → generation prompt.
// Pure and synchronous. No I/O happens here except `composer::prompt_from_file`.

use std::fmt;

use serde::Serialize;

pub mod composer;
pub mod fields;
pub mod game_context;
pub mod relevance;
pub mod team_stats;
pub mod time_of_day;

/// One short natural-language statement derived from a box score.
/// Position in the fact list is narrative order in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fact(String);

impl Fact {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
