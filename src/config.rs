use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Eagerness, Predicate, RuleSet, RuleSetBuilder, SpeculationRule};
use crate::{href_matches, selector_matches};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rules config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Prefetch section (`[prefetch]` in the TOML file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrefetchConfig {
    /// Set to false to emit no prefetch rule.
    pub enabled: bool,
    pub eagerness: Eagerness,
    /// Pattern every prefetched link must match.
    pub include: String,
    /// Patterns never prefetched, e.g. endpoints with side effects.
    pub exclude: Vec<String>,
    /// Links matching this selector are never prefetched.
    pub opt_out_selector: Option<String>,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            eagerness: Eagerness::Moderate,
            include: "/*".to_owned(),
            exclude: vec!["/logout".to_owned(), "/signout".to_owned()],
            opt_out_selector: Some("[data-no-prefetch]".to_owned()),
        }
    }
}

/// Prerender section (`[prerender]` in the TOML file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrerenderConfig {
    pub eagerness: Eagerness,
    /// Pages worth prerendering. Empty means no prerender rule.
    pub paths: Vec<String>,
}

impl Default for PrerenderConfig {
    fn default() -> Self {
        Self {
            eagerness: Eagerness::Eager,
            paths: vec!["/goals".to_owned()],
        }
    }
}

/// Site speculation rules, loaded from TOML. The default produces
/// [`RuleSet::standard()`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub prefetch: PrefetchConfig,
    pub prerender: PrerenderConfig,
}

impl RulesConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on syntax errors or unknown keys.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on I/O or parse failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&data)?;
        tracing::debug!("loaded speculation rules config from {}", path.display());
        Ok(cfg)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns the `toml` error if encoding fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build the rule set this configuration describes.
    #[must_use]
    pub fn to_rule_set(&self) -> RuleSet {
        let mut builder = RuleSetBuilder::new();

        let prefetch = &self.prefetch;
        if prefetch.enabled {
            let mut predicate = href_matches(&prefetch.include);
            for pattern in &prefetch.exclude {
                predicate = predicate.and(!href_matches(pattern));
            }
            if let Some(selector) = &prefetch.opt_out_selector {
                predicate = predicate.and(!selector_matches(selector));
            }
            builder =
                builder.prefetch(SpeculationRule::new(predicate).eagerness(prefetch.eagerness));
        }

        let prerender = &self.prerender;
        let target = match prerender.paths.as_slice() {
            [] => None,
            [path] => Some(href_matches(path)),
            paths => Some(Predicate::any(paths.iter().map(|p| href_matches(p)))),
        };
        if let Some(predicate) = target {
            builder =
                builder.prerender(SpeculationRule::new(predicate).eagerness(prerender.eagerness));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_standard_rule_set() {
        assert_eq!(RulesConfig::default().to_rule_set(), RuleSet::standard());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            RulesConfig::from_toml_str("").unwrap(),
            RulesConfig::default()
        );
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RulesConfig::default();
        let toml = cfg.to_toml_string().unwrap();
        assert_eq!(RulesConfig::from_toml_str(&toml).unwrap(), cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [prefetch]
            eagerness = "conservative"
            exclude = ["/logout"]

            [prerender]
            eagerness = "immediate"
            paths = ["/goals", "/settings"]
        "#;
        let cfg = RulesConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.prefetch.eagerness, Eagerness::Conservative);
        assert_eq!(cfg.prefetch.include, "/*");
        assert_eq!(cfg.prefetch.exclude, vec!["/logout".to_owned()]);
        assert_eq!(
            cfg.prefetch.opt_out_selector.as_deref(),
            Some("[data-no-prefetch]")
        );

        let rules = cfg.to_rule_set();
        assert_eq!(rules.prerender()[0].eagerness, Eagerness::Immediate);
        assert_eq!(
            rules.prerender()[0].predicate,
            href_matches("/goals").or(href_matches("/settings"))
        );
    }

    #[test]
    fn bare_include_is_a_single_leaf() {
        let cfg = RulesConfig {
            prefetch: PrefetchConfig {
                exclude: vec![],
                opt_out_selector: None,
                ..PrefetchConfig::default()
            },
            ..RulesConfig::default()
        };
        assert_eq!(cfg.to_rule_set().prefetch()[0].predicate, href_matches("/*"));
    }

    #[test]
    fn disabled_sections_emit_no_rules() {
        let cfg = RulesConfig::from_toml_str(
            "[prefetch]\nenabled = false\n[prerender]\npaths = []\n",
        )
        .unwrap();
        assert!(cfg.to_rule_set().is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RulesConfig::from_toml_str("[prefetch]\neager = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn bad_eagerness_is_rejected() {
        assert!(RulesConfig::from_toml_str("[prerender]\neagerness = \"soon\"\n").is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = RulesConfig::load("/nonexistent/specrules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
