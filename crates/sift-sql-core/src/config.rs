//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default limit on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest accepted `max_depth`. Nesting up to this bound fits in an
/// 8 MiB stack in unoptimized builds.
pub const MAX_DEPTH_CEILING: usize = 128;

/// Default limit on diagnostics collected before the parse gives up.
pub const DEFAULT_MAX_DIAGNOSTICS: usize = 100;

/// Tunables for a single parse.
///
/// Deserializes from a partial document; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Nesting budget in depth units. A parenthesized or operand
    /// expression costs one unit, a function call one more on top of its
    /// arguments, and a subquery two. Deeper input fails with a
    /// recursion-limit diagnostic.
    pub max_depth: usize,
    /// Recover from errors and keep parsing. When off, the first error
    /// ends the parse.
    pub recover: bool,
    /// Diagnostics collected before the parse is aborted.
    pub max_diagnostics: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            recover: true,
            max_diagnostics: DEFAULT_MAX_DIAGNOSTICS,
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
    #[error("max_depth {max_depth} exceeds the ceiling of {ceiling}")]
    MaxDepthTooLarge { max_depth: usize, ceiling: usize },
    #[error("max_diagnostics must be at least 1")]
    ZeroMaxDiagnostics,
}

impl ParserConfig {
    /// A configuration that stops at the first error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            recover: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    #[must_use]
    pub const fn with_max_diagnostics(mut self, max_diagnostics: usize) -> Self {
        self.max_diagnostics = max_diagnostics;
        self
    }

    /// Checks that the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a limit is zero or `max_depth` is
    /// above [`MAX_DEPTH_CEILING`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(ConfigError::MaxDepthTooLarge {
                max_depth: self.max_depth,
                ceiling: MAX_DEPTH_CEILING,
            });
        }
        if self.max_diagnostics == 0 {
            return Err(ConfigError::ZeroMaxDiagnostics);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.max_depth, 64);
        assert!(config.recover);
        assert_eq!(config.max_diagnostics, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, 8);
        assert!(config.recover);
        assert_eq!(config.max_diagnostics, DEFAULT_MAX_DIAGNOSTICS);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert_eq!(
            ParserConfig::default().with_max_depth(0).validate(),
            Err(ConfigError::ZeroMaxDepth)
        );
        assert_eq!(
            ParserConfig::strict().with_max_diagnostics(0).validate(),
            Err(ConfigError::ZeroMaxDiagnostics)
        );
    }

    #[test]
    fn test_validate_rejects_depth_above_ceiling() {
        let config = ParserConfig::default().with_max_depth(1_000_000);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxDepthTooLarge {
                max_depth: 1_000_000,
                ceiling: MAX_DEPTH_CEILING,
            })
        );
        assert!(ParserConfig::default()
            .with_max_depth(MAX_DEPTH_CEILING)
            .validate()
            .is_ok());
    }
}
