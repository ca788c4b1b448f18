use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::listing::DEFAULT_HIGHLIGHT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marks a chat line as a command, e.g. `!asm x86 nop`.
    pub prefix: String,
    /// Language tag on the listing's code fence.
    pub highlight: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            highlight: DEFAULT_HIGHLIGHT.to_string(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
