//! Template compilation: substitute child expressions into `?` markers.

use super::{Expr, Rendered, count_placeholders};
use crate::dialect::{Dialect, MARKER};
use crate::error::{ExprError, ExprResult};

/// Render `template`, replacing each unescaped marker with the next child.
///
/// `??` is copied through untouched and consumes no child. The template is
/// never modified; `copied` and `cursor` are byte offsets into it.
pub(crate) fn compile(
    template: &str,
    children: &[Option<Expr>],
    dialect: &Dialect,
) -> ExprResult<Rendered> {
    let mut out = Rendered::with_capacity(template.len());
    let mut consumed = 0;
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find(MARKER) {
        let at = cursor + offset;
        if template[at + 1..].starts_with(MARKER) {
            cursor = at + 2;
            continue;
        }

        out.sql.push_str(&template[copied..at]);

        let Some(slot) = children.get(consumed) else {
            let markers = count_placeholders(template);
            tracing::trace!(
                target: "polysql.compile",
                markers,
                children = children.len(),
                "template has more markers than expressions"
            );
            return Err(ExprError::mismatch("compile", out.sql, markers, children.len()));
        };
        let Some(child) = slot.as_ref() else {
            tracing::trace!(
                target: "polysql.compile",
                position = consumed + 1,
                children = children.len(),
                "template marker has no expression"
            );
            return Err(ExprError::NilExpression { at: "compile" });
        };

        out.extend(child.render(dialect)?);
        consumed += 1;
        cursor = at + 1;
        copied = cursor;
    }

    out.sql.push_str(&template[copied..]);

    if consumed != children.len() {
        tracing::trace!(
            target: "polysql.compile",
            markers = consumed,
            children = children.len(),
            "template has fewer markers than expressions"
        );
        return Err(ExprError::mismatch("compile", out.sql, consumed, children.len()));
    }

    Ok(out)
}
