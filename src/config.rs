//! Builder configuration.
//!
//! Environment variables:
//!
//! - `DELEGATED_SIGN_MAX_DEPTH` - maximum delegation path length accepted (default: 16)

/// Default upper bound on delegation nesting.
///
/// Chains observed in practice stay at four or five layers.
pub const DEFAULT_MAX_DELEGATION_DEPTH: usize = 16;

pub const MAX_DEPTH_ENV: &str = "DELEGATED_SIGN_MAX_DEPTH";

/// Configuration for [`ValidationSequenceFactory`](crate::ValidationSequenceFactory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Paths longer than this are rejected before resolution starts.
    pub max_delegation_depth: usize,
}

impl FactoryConfig {
    pub fn new(max_delegation_depth: usize) -> Self {
        Self {
            max_delegation_depth,
        }
    }

    /// Read overrides from the environment, falling back to defaults.
    ///
    /// Unparsable or zero values are ignored.
    pub fn from_env() -> Self {
        Self {
            max_delegation_depth: parse_max_depth(std::env::var(MAX_DEPTH_ENV).ok()),
        }
    }
}

fn parse_max_depth(value: Option<String>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|depth| *depth > 0)
        .unwrap_or(DEFAULT_MAX_DELEGATION_DEPTH)
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            max_delegation_depth: DEFAULT_MAX_DELEGATION_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_depth() {
        assert_eq!(parse_max_depth(Some("4".to_string())), 4);
        assert_eq!(parse_max_depth(Some(" 7 ".to_string())), 7);
        assert_eq!(
            parse_max_depth(Some("0".to_string())),
            DEFAULT_MAX_DELEGATION_DEPTH
        );
        assert_eq!(
            parse_max_depth(Some("deep".to_string())),
            DEFAULT_MAX_DELEGATION_DEPTH
        );
        assert_eq!(parse_max_depth(None), DEFAULT_MAX_DELEGATION_DEPTH);
    }
}
