//! # polysql
//!
//! Build SQL that differs across database dialects from small, reusable
//! expression fragments.
//!
//! ## Features
//!
//! - **Composable**: raw SQL, value tuples, templates, joins, conditionals and
//!   per-dialect switches nest into one expression tree
//! - **Dialect-agnostic rendering**: fragments use a single `?` marker; the
//!   dialect's placeholder syntax is applied once, at the very end
//! - **Checked arguments**: templates must get exactly one expression per
//!   marker, and the finalized SQL must have exactly one placeholder per argument
//! - **Escaping**: `??` is a literal `?` that never consumes an argument
//!
//! ## Example
//!
//! ```ignore
//! use polysql::prelude::*;
//!
//! let postgres = Dialect::new("postgres");
//! let query = compile("SELECT nr, first, last FROM presidents ?", [
//!     when(last.is_some(), compile("WHERE last = ?", [raw("?", last)])),
//! ]);
//!
//! let stmt = polysql::finalize("$%d", &postgres, &query)?;
//! // SELECT nr, first, last FROM presidents WHERE last = $1
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod finalize;
pub mod prelude;
pub mod value;

pub use config::DialectConfig;
pub use dialect::{Dialect, MARKER, PlaceholderScheme};
pub use error::{ExprError, ExprResult};
pub use expr::{
    Expr, Func, RenderFn, Rendered, append, compile, count_placeholders, func, if_else, join,
    map, raw, sql, switch, tuple, when,
};
pub use finalize::{Statement, finalize, finalize_with, rewrite_placeholders};
pub use value::Value;
