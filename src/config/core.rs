use serde::Deserialize;

use crate::formatting::ColorMode;

/// Contents of `.sigcompare.toml`. Every field is optional; command-line
/// flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigCompareConfig {
    /// Compare parameter names as well as types
    #[serde(default)]
    pub strict_param_names: Option<bool>,

    /// Treat unions and intersections as unordered
    #[serde(default)]
    pub normalize_unions: Option<bool>,

    /// File extensions considered in directory mode
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Glob patterns excluded in directory mode
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    /// Only report files that fail
    #[serde(default)]
    pub quiet: Option<bool>,

    #[serde(default)]
    pub color: Option<ColorMode>,
}
