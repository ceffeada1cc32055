//! PostgreSQL dialect.
//!
//! PostgreSQL follows the ANSI defaults for everything this crate emits:
//! - Double-quote identifier quoting (`"name"`)
//! - Standard trailing LIMIT clause

use super::SqlDialect;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    // Uses default quote_identifier (double quotes)
    // Uses default emit_limit (trailing LIMIT n)
}
