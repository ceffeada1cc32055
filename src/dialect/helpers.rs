//! Shared helper functions for SQL dialect implementations.
//!
//! Reusable building blocks that dialects compose to implement the
//! `SqlDialect` trait without duplication.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres, SQL Server
///
/// Pure wrapping: embedded quote characters pass through verbatim. Callers
/// own identifier validity (see the crate-level injection contract).
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident)
}

/// Quote identifier with backticks.
/// Used by: MySQL
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident)
}

// =============================================================================
// Limit Rendering
// =============================================================================

/// Render a row limit as a trailing `LIMIT n` clause.
/// Used by: MySQL, Postgres
pub fn limit_standard(limit: u64) -> String {
    format!("LIMIT {}", limit)
}

/// Render a row limit as `TOP(n)`, placed immediately after `SELECT`.
/// Used by: SQL Server
pub fn limit_top(limit: u64) -> String {
    format!("TOP({})", limit)
}
