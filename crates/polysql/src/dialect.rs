//! Dialect identifiers and placeholder schemes.
//!
//! A [`Dialect`] is an opaque key: the crate ships no list of known databases.
//! What makes one dialect differ from another at finalize time is the
//! [`PlaceholderScheme`] passed alongside it (or registered for it in a
//! [`DialectConfig`](crate::DialectConfig)).

use crate::error::{ExprError, ExprResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The placeholder marker used in templates and raw SQL.
pub const MARKER: char = '?';

/// Format slot replaced by the 1-based position in positional schemes.
const POSITION_SLOT: &str = "%d";

/// Opaque identifier distinguishing SQL syntaxes (e.g. `"postgres"`, `"sqlite"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dialect(Cow<'static, str>);

impl Dialect {
    /// Create a dialect identifier.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Create a dialect identifier from a static string, usable in `const` items.
    ///
    /// ```ignore
    /// const POSTGRES: Dialect = Dialect::from_static("postgres");
    /// ```
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Dialect {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Dialect {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// How a dialect spells a bound parameter in the final SQL.
///
/// Parsed from its string form:
/// - no `%d` slot: a static token reused at every position (`"?"`)
/// - one `%d` slot: a positional token (`"$%d"` → `$1, $2, ...`, `"@p%d"`, `":%d"`)
///
/// Every scheme is built through [`parse`](Self::parse) or
/// [`static_token`](Self::static_token), so its string form always parses
/// back to the same scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceholderScheme(Token);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// The same token at every position.
    Static(String),
    /// `prefix{n}suffix` with `n` counting from 1.
    Positional { prefix: String, suffix: String },
}

impl PlaceholderScheme {
    /// Parse a scheme from its string form.
    ///
    /// Fails if the string is empty or contains more than one `%d` slot.
    pub fn parse(scheme: &str) -> ExprResult<Self> {
        if scheme.is_empty() {
            return Err(ExprError::InvalidPlaceholder(
                "placeholder scheme is empty".to_string(),
            ));
        }

        match scheme.matches(POSITION_SLOT).count() {
            0 => Ok(Self(Token::Static(scheme.to_string()))),
            1 => {
                let (prefix, suffix) = scheme.split_once(POSITION_SLOT).ok_or_else(|| {
                    ExprError::InvalidPlaceholder(format!("'{scheme}' has no position slot"))
                })?;
                Ok(Self(Token::Positional {
                    prefix: prefix.to_string(),
                    suffix: suffix.to_string(),
                }))
            }
            n => Err(ExprError::InvalidPlaceholder(format!(
                "'{scheme}' has {n} position slots, expected at most one"
            ))),
        }
    }

    /// A static scheme using `token` at every position.
    ///
    /// Fails if `token` is empty or contains a `%d` slot.
    pub fn static_token(token: impl Into<String>) -> ExprResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(ExprError::InvalidPlaceholder(
                "static placeholder token is empty".to_string(),
            ));
        }
        if token.contains(POSITION_SLOT) {
            return Err(ExprError::InvalidPlaceholder(format!(
                "static token '{token}' contains a position slot"
            )));
        }
        Ok(Self(Token::Static(token)))
    }

    /// Whether the token depends on the parameter position.
    pub fn is_positional(&self) -> bool {
        matches!(self.0, Token::Positional { .. })
    }

    /// Append the token for the 1-based `position` to `out`.
    pub fn write_token(&self, out: &mut String, position: usize) {
        match &self.0 {
            Token::Static(token) => out.push_str(token),
            Token::Positional { prefix, suffix } => {
                use std::fmt::Write;
                out.push_str(prefix);
                let _ = write!(out, "{position}");
                out.push_str(suffix);
            }
        }
    }

    /// How an escaped marker (`??`) is spelled in the final SQL.
    ///
    /// A dialect whose own token is the bare marker keeps the escape so the
    /// literal stays distinguishable from a parameter.
    pub fn literal_marker(&self) -> &'static str {
        match &self.0 {
            Token::Static(token) if token.len() == 1 && token.starts_with(MARKER) => "??",
            _ => "?",
        }
    }
}

impl fmt::Display for PlaceholderScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Token::Static(token) => f.write_str(token),
            Token::Positional { prefix, suffix } => write!(f, "{prefix}{POSITION_SLOT}{suffix}"),
        }
    }
}

impl FromStr for PlaceholderScheme {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlaceholderScheme {
    type Error = ExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlaceholderScheme> for String {
    fn from(scheme: PlaceholderScheme) -> Self {
        scheme.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(scheme: &PlaceholderScheme, position: usize) -> String {
        let mut out = String::new();
        scheme.write_token(&mut out, position);
        out
    }

    #[test]
    fn parses_static_scheme() {
        let scheme = PlaceholderScheme::parse("?").unwrap();
        assert_eq!(scheme, PlaceholderScheme::static_token("?").unwrap());
        assert_eq!(render(&scheme, 7), "?");
        assert!(!scheme.is_positional());
    }

    #[test]
    fn parses_positional_schemes() {
        let dollar = PlaceholderScheme::parse("$%d").unwrap();
        assert_eq!(render(&dollar, 1), "$1");
        assert_eq!(render(&dollar, 12), "$12");

        let sqlserver = PlaceholderScheme::parse("@p%d").unwrap();
        assert_eq!(render(&sqlserver, 3), "@p3");

        let oracle: PlaceholderScheme = ":%d".parse().unwrap();
        assert_eq!(render(&oracle, 2), ":2");
        assert!(oracle.is_positional());
    }

    #[test]
    fn keeps_suffix_around_position() {
        let scheme = PlaceholderScheme::parse("{%d}").unwrap();
        assert_eq!(render(&scheme, 4), "{4}");
        assert_eq!(scheme.to_string(), "{%d}");
    }

    #[test]
    fn rejects_empty_and_multi_slot_schemes() {
        assert!(PlaceholderScheme::parse("").is_err());
        assert!(PlaceholderScheme::parse("$%d_%d").is_err());
    }

    #[test]
    fn static_token_is_validated() {
        assert!(matches!(
            PlaceholderScheme::static_token(""),
            Err(ExprError::InvalidPlaceholder(_))
        ));
        assert!(matches!(
            PlaceholderScheme::static_token("$%d"),
            Err(ExprError::InvalidPlaceholder(_))
        ));
    }

    #[test]
    fn string_form_parses_back_to_same_scheme() {
        for raw in ["?", "$%d", "@p%d", ":%d", "{%d}"] {
            let scheme = PlaceholderScheme::parse(raw).unwrap();
            assert_eq!(PlaceholderScheme::parse(&scheme.to_string()).unwrap(), scheme);
        }
    }

    #[test]
    fn literal_marker_depends_on_token() {
        assert_eq!(PlaceholderScheme::parse("?").unwrap().literal_marker(), "??");
        assert_eq!(PlaceholderScheme::parse("$%d").unwrap().literal_marker(), "?");
        assert_eq!(
            PlaceholderScheme::static_token("%s").unwrap().literal_marker(),
            "?"
        );
    }

    #[test]
    fn dialect_is_an_opaque_key() {
        const POSTGRES: Dialect = Dialect::from_static("postgres");
        let owned = Dialect::from("postgres".to_string());
        assert_eq!(POSTGRES, owned);
        assert_eq!(owned.as_str(), "postgres");
        assert_eq!(Dialect::new("duckdb").to_string(), "duckdb");
    }
}
