use crate::dialect::MARKER;
use crate::value::Value;

/// The output of rendering one expression: SQL text with generic `?` markers
/// and the arguments bound to them, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Rendered {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Empty text, no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(sql: usize) -> Self {
        Self {
            sql: String::with_capacity(sql),
            args: Vec::new(),
        }
    }

    /// Whether the rendered text is empty. Enclosing joins skip such entries.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of unescaped markers in the rendered text.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }

    /// Append another fragment's text and arguments.
    pub(crate) fn extend(&mut self, other: Rendered) {
        self.sql.push_str(&other.sql);
        self.args.extend(other.args);
    }
}

/// Count unescaped `?` markers; a doubled `??` is a literal and counts as none.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut rest = sql;
    while let Some(at) = rest.find(MARKER) {
        let after = &rest[at + 1..];
        if after.starts_with(MARKER) {
            rest = &after[1..];
        } else {
            count += 1;
            rest = after;
        }
    }
    count
}
