//! # Sift
//!
//! Compiles dialect-neutral filter expressions into multi-dialect SQL.
//!
//! ## Architecture
//!
//! Sift is the compiler half of a query builder. Callers supply a field-ID to
//! column-name mapping and a JSON-shaped expression tree; sift emits literal
//! SQL text:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        JSON Request ({"where": [...], "limit": n})       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [decode]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Typed Expression AST                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [clause compiler + dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Fully Parenthesized WHERE Clause + LIMIT          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [statement assembly]
//! ┌─────────────────────────────────────────────────────────┐
//! │              SELECT * FROM data ... ;                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole pipeline is a pure function; concurrent invocations share no
//! state.
//!
//! ## Injection contract
//!
//! Sift emits inline literals, not parameterized queries. String literals are
//! single-quoted with **no escaping** of embedded quote characters, and
//! identifier quoting is pure wrapping. This is a deliberate, tested
//! contract: callers embedding untrusted input must pre-validate it.
//!
//! ## Example
//!
//! ```
//! use sift::{generate, FieldTable};
//! use serde_json::json;
//!
//! let fields = FieldTable::from([(2, "name"), (4, "age")]);
//! let query = json!({
//!     "where": ["and", ["not-empty", ["field", 2]], [">", ["field", 4], 25]],
//!     "limit": 10,
//! });
//!
//! let sql = generate("mysql", &fields, &query).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM data WHERE ((`name` IS NOT NULL) AND (`age` > 25)) LIMIT 10;"
//! );
//! ```

pub mod dialect;
pub mod error;
pub mod expr;
pub mod fields;
pub mod query;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dialect::{Dialect, LimitPlacement, SqlDialect};
    pub use crate::error::{GenerateError, GenerateResult};
    pub use crate::expr::{
        // Constructors
        field,
        lit_bool,
        lit_float,
        lit_int,
        lit_str,
        nil,
        // Types
        Expr,
        Literal,
        Operator,
        NIL,
    };
    pub use crate::fields::FieldTable;
    pub use crate::query::{generate, QueryRequest};
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use error::{GenerateError, GenerateResult};
pub use expr::{Expr, Literal, Operator};
pub use fields::FieldTable;
pub use query::{generate, QueryRequest};
