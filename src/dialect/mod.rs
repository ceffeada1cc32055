//! SQL dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the dialect differences
//! the filter compiler cares about. Each dialect implements `SqlDialect` for
//! its specific syntax:
//!
//! - Identifier quoting: `"` (Postgres, SQL Server), `` ` `` (MySQL)
//! - Row limiting: trailing `LIMIT n` vs `TOP(n)` after `SELECT`
//!
//! # Usage
//!
//! ```
//! use sift::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::MySql;
//! assert_eq!(dialect.quote_identifier("name"), "`name`");
//! ```

mod mysql;
mod postgres;
mod sqlserver;

pub mod helpers;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlserver::SqlServer;

use std::str::FromStr;

use crate::error::GenerateError;

/// SQL dialect trait - defines how dialect-variant fragments are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging and `FromStr` round-tripping.
    fn name(&self) -> &'static str;

    /// Quote an identifier (column name).
    ///
    /// Pure wrapping, no escaping of embedded quote characters.
    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    /// Render a row limit.
    fn emit_limit(&self, limit: u64) -> String {
        helpers::limit_standard(limit)
    }

    /// Where the rendered limit goes in the assembled statement.
    fn limit_placement(&self) -> LimitPlacement {
        LimitPlacement::Trailing
    }
}

/// Position of the limit segment within the assembled statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPlacement {
    /// Immediately after `SELECT`, before the column list (SQL Server TOP).
    AfterSelect,
    /// At the very end of the statement, after the WHERE clause.
    Trailing,
}

/// Supported SQL dialects.
///
/// A closed set: adding a dialect is one new variant, one unit struct, and
/// one arm in `dialect()` and `from_str()` - never a string-comparison chain
/// scattered across components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Postgres,
    SqlServer,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::SqlServer => &SqlServer,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn emit_limit(&self, limit: u64) -> String {
        self.dialect().emit_limit(limit)
    }

    fn limit_placement(&self) -> LimitPlacement {
        self.dialect().limit_placement()
    }
}

impl FromStr for Dialect {
    type Err = GenerateError;

    /// Parse one of the literal strings `mysql`, `postgres`, `sqlserver`.
    ///
    /// An unrecognized dialect string is a caller error and fails fast.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(Dialect::MySql),
            "postgres" => Ok(Dialect::Postgres),
            "sqlserver" => Ok(Dialect::SqlServer),
            other => Err(GenerateError::UnknownDialect(other.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
