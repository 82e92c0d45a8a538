//! Composable SQL expressions.
//!
//! An [`Expr`] is a tree of small fragments. Rendering walks the tree
//! depth-first, left to right, and produces one [`Rendered`] fragment: SQL
//! text using the generic `?` marker plus the arguments bound to those markers
//! in the same order. Dialect-specific placeholders are only substituted by
//! [`finalize`](crate::finalize).
//!
//! # Example
//!
//! ```ignore
//! use polysql::{compile, join, switch, tuple, when, sql, Dialect};
//!
//! let insert = join(" ", [
//!     sql("INSERT INTO presidents (first, last)"),
//!     compile("VALUES ?", [join(", ", [
//!         tuple(["George", "Washington"]),
//!         tuple(["John", "Adams"]),
//!     ])]),
//!     switch([("postgres", sql("RETURNING nr"))]),
//! ]);
//!
//! let stmt = polysql::finalize("$%d", &Dialect::new("postgres"), &insert)?;
//! // INSERT INTO presidents (first, last) VALUES ($1, $2), ($3, $4) RETURNING nr
//! ```

mod compile;
mod rendered;


pub use rendered::{Rendered, count_placeholders};

use crate::dialect::Dialect;
use crate::error::ExprResult;
use crate::finalize::{Statement, finalize};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-defined expression.
pub type RenderFn = dyn Fn(&Dialect) -> ExprResult<Rendered> + Send + Sync;

/// A caller-defined leaf, see [`func`].
#[derive(Clone)]
pub struct Func(Arc<RenderFn>);

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Func").field(&"<dyn Fn>").finish()
    }
}

/// Expression node.
///
/// Rendering never mutates a node, so one tree can be rendered any number of
/// times, from any number of threads, under different dialects.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Literal SQL with pre-bound arguments. Markers in `sql` count like
    /// template markers when the tree is finalized.
    Raw { sql: String, args: Vec<Value> },

    /// `(?, ?, ...)` bound to `values`, in order.
    Tuple { values: Vec<Value> },

    /// A template whose unescaped markers are replaced by the rendered
    /// children, one child per marker.
    Compile {
        template: String,
        children: Vec<Option<Expr>>,
    },

    /// Non-empty entries joined by `separator`; absent or empty entries are
    /// dropped along with their separator.
    Join {
        separator: String,
        items: Vec<Option<Expr>>,
    },

    /// `then` if `condition` holds, else `otherwise`. A missing branch
    /// renders as empty.
    If {
        condition: bool,
        then: Option<Box<Expr>>,
        otherwise: Option<Box<Expr>>,
    },

    /// The entry for the active dialect. A dialect without an entry renders
    /// as empty.
    Switch { cases: BTreeMap<Dialect, Expr> },

    /// Caller-defined rendering.
    Func(Func),
}

impl Expr {
    /// Render this expression into generic-marker SQL and its arguments.
    pub fn render(&self, dialect: &Dialect) -> ExprResult<Rendered> {
        match self {
            Expr::Raw { sql, args } => Ok(Rendered::new(sql.as_str(), args.clone())),
            Expr::Tuple { values } => Ok(Rendered::new(tuple_sql(values.len()), values.clone())),
            Expr::Compile { template, children } => compile::compile(template, children, dialect),
            Expr::Join { separator, items } => {
                let mut out = Rendered::empty();
                for item in items.iter().flatten() {
                    let part = item.render(dialect)?;
                    if part.is_empty() {
                        continue;
                    }
                    if !out.is_empty() {
                        out.sql.push_str(separator);
                    }
                    out.extend(part);
                }
                Ok(out)
            }
            Expr::If {
                condition,
                then,
                otherwise,
            } => {
                let branch = if *condition { then } else { otherwise };
                match branch {
                    Some(expr) => expr.render(dialect),
                    None => Ok(Rendered::empty()),
                }
            }
            Expr::Switch { cases } => match cases.get(dialect) {
                Some(expr) => expr.render(dialect),
                None => Ok(Rendered::empty()),
            },
            Expr::Func(f) => (f.0)(dialect),
        }
    }

    /// Render and rewrite placeholders, see [`finalize`].
    pub fn finalize(&self, placeholder: &str, dialect: &Dialect) -> ExprResult<Statement> {
        finalize(placeholder, dialect, self)
    }
}

impl From<&str> for Expr {
    fn from(sql: &str) -> Self {
        self::sql(sql)
    }
}

impl From<String> for Expr {
    fn from(sql: String) -> Self {
        self::sql(sql)
    }
}

fn tuple_sql(n: usize) -> String {
    let mut out = String::with_capacity(2 + n * 3);
    out.push('(');
    for i in 0..n {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out.push(')');
    out
}

/// Literal SQL without arguments.
pub fn sql(sql: impl Into<String>) -> Expr {
    Expr::Raw {
        sql: sql.into(),
        args: Vec::new(),
    }
}

/// Literal SQL with pre-bound arguments, e.g. `raw("last = ?", ["Adams"])`.
pub fn raw<V: Into<Value>>(sql: impl Into<String>, args: impl IntoIterator<Item = V>) -> Expr {
    Expr::Raw {
        sql: sql.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// A parenthesized group of bound values: `(?, ?, ?)`.
///
/// An empty tuple renders as `()`; keep it out of contexts that need a value.
pub fn tuple<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Expr {
    Expr::Tuple {
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Substitute `children` into the markers of `template`.
///
/// Fails at render time if the number of unescaped markers differs from the
/// number of children, or if a child is `None`.
pub fn compile<E: Into<Option<Expr>>>(
    template: impl Into<String>,
    children: impl IntoIterator<Item = E>,
) -> Expr {
    Expr::Compile {
        template: template.into(),
        children: children.into_iter().map(Into::into).collect(),
    }
}

/// Join the non-empty entries with `separator`.
pub fn join<E: Into<Option<Expr>>>(
    separator: impl Into<String>,
    items: impl IntoIterator<Item = E>,
) -> Expr {
    Expr::Join {
        separator: separator.into(),
        items: items.into_iter().map(Into::into).collect(),
    }
}

/// Concatenate the non-empty entries.
pub fn append<E: Into<Option<Expr>>>(items: impl IntoIterator<Item = E>) -> Expr {
    join("", items)
}

/// `then` when `condition` holds, otherwise nothing.
pub fn when(condition: bool, then: impl Into<Option<Expr>>) -> Expr {
    if_else(condition, then, None::<Expr>)
}

/// `then` when `condition` holds, otherwise `otherwise`.
pub fn if_else(
    condition: bool,
    then: impl Into<Option<Expr>>,
    otherwise: impl Into<Option<Expr>>,
) -> Expr {
    Expr::If {
        condition,
        then: then.into().map(Box::new),
        otherwise: otherwise.into().map(Box::new),
    }
}

/// Pick the expression registered for the active dialect.
///
/// Dialects without an entry render as empty, so the switch drops out of an
/// enclosing [`join`].
pub fn switch<D, E>(cases: impl IntoIterator<Item = (D, E)>) -> Expr
where
    D: Into<Dialect>,
    E: Into<Expr>,
{
    Expr::Switch {
        cases: cases
            .into_iter()
            .map(|(dialect, expr)| (dialect.into(), expr.into()))
            .collect(),
    }
}

/// Map a collection into expressions, e.g. one [`tuple`] per row.
pub fn map<T, I, F>(items: I, f: F) -> Vec<Expr>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Expr,
{
    items.into_iter().map(f).collect()
}

/// A caller-defined expression.
///
/// ```ignore
/// let now = polysql::func(|dialect| {
///     let sql = if dialect.as_str() == "sqlite" { "CURRENT_TIMESTAMP" } else { "NOW()" };
///     Ok(Rendered::new(sql, vec![]))
/// });
/// ```
pub fn func<F>(f: F) -> Expr
where
    F: Fn(&Dialect) -> ExprResult<Rendered> + Send + Sync + 'static,
{
    Expr::Func(Func(Arc::new(f)))
}
