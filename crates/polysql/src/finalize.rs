//! Turn an expression tree into dialect-specific SQL.
//!
//! Finalizing happens in two passes:
//! 1. the tree is rendered into one string using the generic `?` marker and a
//!    flat argument list;
//! 2. that string is scanned once, left to right, and every unescaped marker
//!    is replaced by the dialect's placeholder token for its position.
//!
//! The number of rewritten markers must equal the number of arguments; this
//! is the only global check, individual operators never re-validate it.

use crate::dialect::{Dialect, MARKER, PlaceholderScheme};
use crate::error::{ExprError, ExprResult};
use crate::expr::Expr;
use crate::value::Value;

/// Longest SQL (in bytes) included in log events.
const MAX_LOGGED_SQL: usize = 200;

/// Finalized SQL and its arguments, ready for a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    args: Vec<Value>,
}

impl Statement {
    /// The dialect-specific SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments in placeholder order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.args
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

/// Finalize `expr` for `dialect`, spelling placeholders with `placeholder`
/// (`"?"`, `"$%d"`, `"@p%d"`, ...).
///
/// Passing `None` as the expression fails with [`ExprError::NilExpression`].
pub fn finalize<'a>(
    placeholder: &str,
    dialect: &Dialect,
    expr: impl Into<Option<&'a Expr>>,
) -> ExprResult<Statement> {
    let scheme = PlaceholderScheme::parse(placeholder)?;
    finalize_with(&scheme, dialect, expr)
}

/// Like [`finalize`], with an already parsed scheme.
pub fn finalize_with<'a>(
    scheme: &PlaceholderScheme,
    dialect: &Dialect,
    expr: impl Into<Option<&'a Expr>>,
) -> ExprResult<Statement> {
    let result = lower(scheme, dialect, expr.into());
    match &result {
        Ok(stmt) => tracing::debug!(
            target: "polysql.sql",
            %dialect,
            %scheme,
            param_count = stmt.args.len(),
            sql = %truncate_sql_bytes(&stmt.sql, MAX_LOGGED_SQL),
            "finalized statement",
        ),
        Err(err) => tracing::debug!(
            target: "polysql.sql",
            %dialect,
            %scheme,
            error = %err,
            "failed to finalize statement",
        ),
    }
    result
}

fn lower(
    scheme: &PlaceholderScheme,
    dialect: &Dialect,
    expr: Option<&Expr>,
) -> ExprResult<Statement> {
    let expr = expr.ok_or(ExprError::NilExpression { at: "finalize" })?;
    let rendered = expr.render(dialect)?;

    let (sql, placeholders) = rewrite_placeholders(scheme, &rendered.sql);
    if placeholders != rendered.args.len() {
        return Err(ExprError::mismatch(
            "finalize",
            sql,
            placeholders,
            rendered.args.len(),
        ));
    }

    Ok(Statement {
        sql,
        args: rendered.args,
    })
}

/// Replace generic markers in `sql` with the tokens of `scheme`.
///
/// Returns the rewritten SQL and the number of unescaped markers replaced.
/// Each `??` becomes [`PlaceholderScheme::literal_marker`] and takes no
/// position.
pub fn rewrite_placeholders(scheme: &PlaceholderScheme, sql: &str) -> (String, usize) {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut position = 0;
    let mut rest = sql;

    while let Some(at) = rest.find(MARKER) {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];
        if after.starts_with(MARKER) {
            out.push_str(scheme.literal_marker());
            rest = &after[1..];
        } else {
            position += 1;
            scheme.write_token(&mut out, position);
            rest = after;
        }
    }
    out.push_str(rest);

    (out, position)
}

/// Truncate a SQL string to at most `max_bytes` bytes at a valid UTF-8 char boundary.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
