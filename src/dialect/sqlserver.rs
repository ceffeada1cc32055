//! SQL Server (T-SQL) dialect.
//!
//! T-SQL differences from ANSI:
//! - `TOP(n)` instead of a trailing LIMIT clause
//! - The limit segment is placed immediately after `SELECT`, before the
//!   column list

use super::helpers;
use super::{LimitPlacement, SqlDialect};

/// SQL Server (T-SQL) dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlServer;

impl SqlDialect for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    // Uses default quote_identifier (double quotes)

    fn emit_limit(&self, limit: u64) -> String {
        helpers::limit_top(limit)
    }

    fn limit_placement(&self) -> LimitPlacement {
        LimitPlacement::AfterSelect
    }
}
