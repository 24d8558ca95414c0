//! Mesh configuration: predicate tolerance and strict-mode validation.

use serde::{Deserialize, Serialize};

use crate::geometry::winding::WindingOrder;

/// Default absolute tolerance for [`sign`](crate::geometry::predicates::sign)
/// and every predicate built on it.
///
/// Cross products within this distance of zero are treated as zero, so points
/// that are collinear up to rounding noise are never classified as left or
/// right of an edge.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Environment variable that turns on strict mode in [`MeshConfig::from_env`].
pub const STRICT_ENV_VAR: &str = "QUADEDGE_STRICT";

/// Configuration carried by a [`QuadEdgeMesh`](crate::core::quad_edge::QuadEdgeMesh).
///
/// # Examples
///
/// ```rust
/// use quadedge::core::config::{MeshConfig, MeshConfigBuilder, DEFAULT_TOLERANCE};
///
/// let config = MeshConfig::default();
/// assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
/// assert!(!config.strict);
///
/// let strict = MeshConfigBuilder::default()
///     .strict(true)
///     .tolerance(1e-9)
///     .build()
///     .unwrap();
/// assert!(strict.strict);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct MeshConfig {
    /// Absolute epsilon used by the sign function and all predicates.
    #[builder(default = "DEFAULT_TOLERANCE")]
    pub tolerance: f64,
    /// Run the validator over touched edges after Connect, Swap and Delete,
    /// logging each violation.
    #[builder(default)]
    pub strict: bool,
    /// Winding order used by strict-mode validation for operators that take
    /// no explicit order.
    #[builder(default)]
    pub winding: WindingOrder,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
            winding: WindingOrder::default(),
        }
    }
}

impl MeshConfig {
    /// Default configuration, with strict mode enabled when the
    /// [`STRICT_ENV_VAR`] environment variable is set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            strict: std::env::var_os(STRICT_ENV_VAR).is_some(),
            ..Self::default()
        }
    }
}

impl MeshConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.tolerance {
            Some(tolerance) if !(tolerance.is_finite() && tolerance >= 0.0) => Err(format!(
                "tolerance must be finite and non-negative, got {tolerance}"
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builder_defaults_match_default_config() {
        let built = MeshConfigBuilder::default().build().unwrap();
        assert_eq!(built, MeshConfig::default());
    }

    #[test]
    fn builder_rejects_invalid_tolerance() {
        assert!(MeshConfigBuilder::default().tolerance(-1.0).build().is_err());
        assert!(
            MeshConfigBuilder::default()
                .tolerance(f64::NAN)
                .build()
                .is_err()
        );
        assert!(MeshConfigBuilder::default().tolerance(0.0).build().is_ok());
    }

    #[test]
    fn from_env_follows_strict_variable() {
        let config = MeshConfig::from_env();
        assert_eq!(config.strict, std::env::var_os(STRICT_ENV_VAR).is_some());
        assert_relative_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.winding, WindingOrder::default());
        if std::env::var_os(STRICT_ENV_VAR).is_none() {
            assert_eq!(config, MeshConfig::default());
        }
    }

    #[test]
    fn config_serde_round_trip() {
        let config = MeshConfigBuilder::default()
            .strict(true)
            .winding(WindingOrder::clockwise())
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let restored: MeshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
