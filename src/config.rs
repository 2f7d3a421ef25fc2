use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIME_LIMIT_MS: u64 = 30_000;
pub const DEFAULT_MAX_DEPTH: u8 = 9;

/// Linear weights of the evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub material: i32,
    pub mobility: i32,
    pub corner: i32,
    pub edge: i32,
    pub stability: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            material: 10,
            mobility: 7,
            corner: 40,
            edge: 3,
            stability: 4,
        }
    }
}

/// Search settings accepted from the host. Missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub time_limit_ms: u64,
    pub max_depth: u8,
    pub weights: Weights,
    /// Fan root moves out to a worker pool when possible.
    pub parallel: bool,
}

impl SearchConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            max_depth: DEFAULT_MAX_DEPTH,
            weights: Weights::default(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = SearchConfig::default();

        assert_eq!(config.time_limit(), Duration::from_secs(30));
        assert_eq!(config.max_depth, 9);
        assert_eq!(config.weights.corner, 40);
        assert!(config.parallel);
    }
}
