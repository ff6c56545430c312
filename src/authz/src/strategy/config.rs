//! Access control strategy configuration

use serde::{Deserialize, Serialize};

/// Default ceiling on inheritance climbs per resource check
pub const DEFAULT_MAX_INHERITANCE_DEPTH: usize = 64;

/// Access control strategy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Grant every check to principals holding an administrator role
    pub allow_full_admin_access: bool,

    /// Maximum number of ancestors visited while climbing inherited ACLs
    pub max_inheritance_depth: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            allow_full_admin_access: false,
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
        }
    }
}

impl StrategyConfig {
    pub fn with_admin_access(mut self, allow: bool) -> Self {
        self.allow_full_admin_access = allow;
        self
    }

    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::default();
        assert!(!config.allow_full_admin_access);
        assert_eq!(config.max_inheritance_depth, DEFAULT_MAX_INHERITANCE_DEPTH);
    }

    #[test]
    fn test_partial_deserialization() {
        let config: StrategyConfig =
            serde_json::from_str(r#"{"allow_full_admin_access": true}"#).unwrap();

        assert_eq!(
            config,
            StrategyConfig::default().with_admin_access(true)
        );

        let config: StrategyConfig = serde_json::from_str(r#"{"max_inheritance_depth": 3}"#).unwrap();
        assert_eq!(config.max_inheritance_depth, 3);
        assert!(!config.allow_full_admin_access);
    }
}
