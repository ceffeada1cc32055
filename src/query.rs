//! Query request and final statement assembly.
//!
//! A request is an optional filter expression plus an optional row limit.
//! Assembly is pure template work: compile the WHERE clause, render the limit
//! per dialect, join the non-empty segments with single spaces, terminate
//! with `;`.

use serde_json::Value;

use crate::dialect::{Dialect, LimitPlacement, SqlDialect};
use crate::error::{GenerateError, GenerateResult};
use crate::expr::Expr;
use crate::fields::FieldTable;

/// The fixed source table every statement selects from.
const TABLE: &str = "data";

/// A query request: optional filter, optional row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    pub filter: Option<Expr>,
    pub limit: Option<u64>,
}

impl QueryRequest {
    /// Empty request: no filter, no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter expression.
    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the row limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Decode a JSON request object.
    ///
    /// Accepts an object with optional `"where"` and optional non-negative
    /// integer `"limit"` keys. JSON `null` (or an empty object) means no
    /// filter and no limit.
    pub fn from_value(value: &Value) -> GenerateResult<Self> {
        let object = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(object) => object,
            other => {
                return Err(GenerateError::MalformedExpression(format!(
                    "query must be an object, got {}",
                    other
                )))
            }
        };

        let filter = match object.get("where") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(Expr::from_value(raw)?),
        };

        let limit = match object.get("limit") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(raw.as_u64().ok_or_else(|| {
                GenerateError::MalformedExpression(format!(
                    "limit must be a non-negative integer, got {}",
                    raw
                ))
            })?),
        };

        Ok(Self { filter, limit })
    }

    /// Compile this request into a complete, semicolon-terminated statement.
    pub fn to_sql(&self, fields: &FieldTable, dialect: Dialect) -> GenerateResult<String> {
        let where_clause = match &self.filter {
            Some(filter) => format!("WHERE {}", filter.to_clause(fields, dialect)?),
            None => String::new(),
        };
        let limit_clause = match self.limit {
            Some(limit) => dialect.emit_limit(limit),
            None => String::new(),
        };

        let select = format!("* FROM {}", TABLE);
        let segments: [&str; 4] = match dialect.limit_placement() {
            LimitPlacement::AfterSelect => ["SELECT", &limit_clause, &select, &where_clause],
            LimitPlacement::Trailing => ["SELECT", &select, &where_clause, &limit_clause],
        };

        let statement = segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(statement + ";")
    }
}

/// Compile a JSON query request to SQL for the named dialect.
///
/// The single entry point for wire-format callers:
///
/// ```
/// use sift::{generate, FieldTable};
/// use serde_json::json;
///
/// let fields = FieldTable::from([(2, "name")]);
/// let query = json!({"where": ["=", ["field", 2], "cam"]});
/// let sql = generate("postgres", &fields, &query).unwrap();
/// assert_eq!(sql, "SELECT * FROM data WHERE (\"name\" = 'cam');");
/// ```
pub fn generate(dialect: &str, fields: &FieldTable, query: &Value) -> GenerateResult<String> {
    let dialect: Dialect = dialect.parse()?;
    let request = QueryRequest::from_value(query)?;
    request.to_sql(fields, dialect)
}
