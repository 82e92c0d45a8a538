//! Convenient imports for typical `polysql` usage.
//!
//! ```ignore
//! use polysql::prelude::*;
//! ```

pub use crate::{
    Dialect, DialectConfig, Expr, ExprError, ExprResult, PlaceholderScheme, Rendered, Statement,
    Value, append, compile, finalize, func, if_else, join, map, raw, sql, switch, tuple, when,
};
