use serde::{Deserialize, Serialize};

use crate::backend::DEFAULT_BACKEND;

/// Default value of [`Config::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------------
// LegacyRepr

/// How the decoder treats legacy `repr` payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyRepr {
    /// Every payload is an [`UnsupportedLegacy`](crate::Error::UnsupportedLegacy) error.
    Reject,
    /// Payloads naming a type with a legacy constructor are evaluated,
    /// others are rejected.
    #[default]
    AllowListed,
}

// -----------------------------------------------------------------------------
// Config

/// Runtime settings of a [`Codec`](crate::Codec).
///
/// Deserializable, so it can be loaded from an application's own config
/// file. Missing keys take their default.
///
/// # Examples
///
/// ```
/// use tj_graph::{Config, LegacyRepr};
///
/// let config = Config::builder()
///     .max_depth(64)
///     .legacy_repr(LegacyRepr::Reject)
///     .build();
///
/// assert_eq!(config.max_depth, 64);
/// assert_eq!(config.backend, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum nesting of values while encoding or documents while decoding.
    pub max_depth: usize,
    pub legacy_repr: LegacyRepr,
    /// Name of the backend, see [`load_backend`](crate::backend::load_backend).
    pub backend: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            legacy_repr: LegacyRepr::default(),
            backend: DEFAULT_BACKEND.to_owned(),
        }
    }
}

impl Config {
    /// Create a new config builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    max_depth: Option<usize>,
    legacy_repr: Option<LegacyRepr>,
    backend: Option<String>,
}

impl ConfigBuilder {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn legacy_repr(mut self, policy: LegacyRepr) -> Self {
        self.legacy_repr = Some(policy);
        self
    }

    pub fn backend(mut self, name: impl Into<String>) -> Self {
        self.backend = Some(name.into());
        self
    }

    /// Build the config, filling unset values with defaults.
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            legacy_repr: self.legacy_repr.unwrap_or(defaults.legacy_repr),
            backend: self.backend.unwrap_or(defaults.backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_MAX_DEPTH, LegacyRepr};

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.legacy_repr, LegacyRepr::AllowListed);
        assert_eq!(config.backend, "json");
        assert_eq!(Config::builder().build(), config);
    }

    #[test]
    fn partial_config_file() {
        let config: Config =
            serde_json::from_str(r#"{"legacy_repr": "reject", "backend": "json-pretty"}"#).unwrap();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.legacy_repr, LegacyRepr::Reject);
        assert_eq!(config.backend, "json-pretty");
    }
}
