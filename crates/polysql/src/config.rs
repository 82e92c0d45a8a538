//! Dialect registry: which placeholder scheme each dialect uses.
//!
//! ```toml
//! [dialects]
//! postgres = "$%d"
//! sqlite = "?"
//! sqlserver = "@p%d"
//! ```

use crate::dialect::{Dialect, PlaceholderScheme};
use crate::error::{ExprError, ExprResult};
use crate::expr::Expr;
use crate::finalize::{Statement, finalize_with};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder schemes keyed by dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectConfig {
    #[serde(default)]
    pub dialects: BTreeMap<Dialect, PlaceholderScheme>,
}

impl DialectConfig {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the scheme for `dialect`.
    pub fn with(mut self, dialect: impl Into<Dialect>, scheme: PlaceholderScheme) -> Self {
        self.dialects.insert(dialect.into(), scheme);
        self
    }

    /// Parse a registry from TOML.
    pub fn from_toml_str(raw: &str) -> ExprResult<Self> {
        toml::from_str(raw).map_err(|e| ExprError::Config(format!("failed to parse config: {e}")))
    }

    /// Load a registry from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ExprResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExprError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            ExprError::Config(msg) => ExprError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// The scheme registered for `dialect`.
    pub fn scheme(&self, dialect: &Dialect) -> ExprResult<&PlaceholderScheme> {
        self.dialects
            .get(dialect)
            .ok_or_else(|| ExprError::UnknownDialect(dialect.clone()))
    }

    /// Finalize `expr` using the scheme registered for `dialect`.
    pub fn finalize<'a>(
        &self,
        dialect: &Dialect,
        expr: impl Into<Option<&'a Expr>>,
    ) -> ExprResult<Statement> {
        finalize_with(self.scheme(dialect)?, dialect, expr)
    }
}
