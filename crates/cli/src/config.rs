//! `provex.toml` settings.

use std::path::Path;

use provex_explain::ExplainConfig;
use serde::Deserialize;

/// Top-level layout of `provex.toml`.
///
/// ```toml
/// [explain]
/// depth_limit = 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub explain: ExplainConfig,
}

/// Read settings from `path`, or defaults when no file was given.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings, String> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("error: could not read '{}': {}", path.display(), e))?;

    parse(&text).map_err(|e| format!("error: could not parse '{}': {}", path.display(), e))
}

fn parse(text: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(text)
}
