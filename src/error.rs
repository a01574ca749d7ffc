use thiserror::Error;

use crate::config::ConfigError;
use crate::parse::ParseError;
use crate::CompileError;

/// Unified error type covering parsing, compilation, JSON, configuration and
/// I/O.
///
/// Returned by convenience methods like
/// [`RuleSet::from_json()`](crate::RuleSet::from_json) and
/// [`RuleSet::from_file()`](crate::RuleSet::from_file).
#[derive(Debug, Error)]
pub enum SpecrulesError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("invalid speculation rules JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
