use serde::{Deserialize, Serialize};

/// Depth budget used when the caller does not give one.
pub const DEFAULT_DEPTH_LIMIT: usize = 4;

/// Explainer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Levels of rule application expanded before a branch is cut off into
    /// the subproof cache.
    pub depth_limit: usize,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        ExplainConfig {
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_is_four() {
        assert_eq!(ExplainConfig::default().depth_limit, 4);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ExplainConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ExplainConfig::default());
        let cfg: ExplainConfig = serde_json::from_str(r#"{"depth_limit": 9}"#).unwrap();
        assert_eq!(cfg.depth_limit, 9);
    }
}
