//! Filter expression AST - the core of the filter-to-SQL compiler.
//!
//! The wire format is a JSON-shaped nested list (`["and", ["=", ["field", 2],
//! "cam"], ...]`). This module decodes it into a strongly-typed AST with
//! exhaustive pattern matching enforced by the compiler, then compiles the
//! AST bottom-up into a fully parenthesized SQL boolean clause.
//!
//! Shape validation (operator tokens, field-reference shape, operand counts)
//! happens at decode time, so the recursive compiler works on well-formed
//! trees.

use serde_json::Value;

use crate::dialect::{Dialect, SqlDialect};
use crate::error::{GenerateError, GenerateResult};
use crate::fields::FieldTable;

/// The reserved NULL sentinel.
///
/// A literal three-character string, not an absence-of-value type. It renders
/// as the bare token `nil`, which is not valid SQL on its own; the
/// equality/NULL rewrite consumes it before it can reach final output.
pub const NIL: &str = "nil";

/// Tag marking a two-element array as a field reference.
const FIELD_TAG: &str = "field";

// =============================================================================
// Expression AST
// =============================================================================

/// A filter expression node.
///
/// Every variant must be handled in `to_clause()` and `resolve_operand()` -
/// the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference into the field table: `["field", id]`
    Field(u32),

    /// Scalar literal operand
    Literal(Literal),

    /// Operation: `[operator, operand, ...]`
    Op { op: Operator, args: Vec<Expr> },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Recognized operators, a closed grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
    Lt,
    Gt,
    Eq,
    Ne,
    IsEmpty,
    NotEmpty,
}

impl Operator {
    /// The wire-format token for this operator.
    ///
    /// For the comparison operators this doubles as the SQL operator text.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::IsEmpty => "is-empty",
            Operator::NotEmpty => "not-empty",
        }
    }

    /// Look up an operator by its wire-format token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "not" => Some(Operator::Not),
            "<" => Some(Operator::Lt),
            ">" => Some(Operator::Gt),
            "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            "is-empty" => Some(Operator::IsEmpty),
            "not-empty" => Some(Operator::NotEmpty),
            _ => None,
        }
    }

    /// Validate an operand count against this operator's arity.
    fn check_arity(&self, count: usize) -> GenerateResult<()> {
        let ok = match self {
            Operator::And | Operator::Or => count >= 1,
            Operator::Not | Operator::IsEmpty | Operator::NotEmpty => count == 1,
            Operator::Lt | Operator::Gt => count == 2,
            Operator::Eq | Operator::Ne => count >= 2,
        };
        if ok {
            Ok(())
        } else {
            Err(arity_error(*self, count))
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Field reference by ID.
pub fn field(id: u32) -> Expr {
    Expr::Field(id)
}

/// String literal.
pub fn lit_str(s: impl Into<String>) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// Integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Float literal.
pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

/// Boolean literal.
pub fn lit_bool(b: bool) -> Expr {
    Expr::Literal(Literal::Bool(b))
}

/// The NULL sentinel literal.
pub fn nil() -> Expr {
    lit_str(NIL)
}

impl Expr {
    /// Operation node from an operator and its operands.
    pub fn op(op: Operator, args: Vec<Expr>) -> Self {
        Expr::Op { op, args }
    }
}

// =============================================================================
// Literal Rendering
// =============================================================================

impl Literal {
    /// Render this literal as SQL text. Dialect-independent.
    ///
    /// - The sentinel string `"nil"` renders as the bare token `nil`.
    /// - Any other string renders single-quoted with no escaping of embedded
    ///   quote characters. This is a deliberate, documented contract: callers
    ///   embedding untrusted input must pre-validate it, or the resulting
    ///   statement is injectable.
    /// - Booleans render as `true`/`false`, which some backends reject in a
    ///   comparison. Known edge case, documented rather than fixed.
    pub fn render(&self) -> String {
        match self {
            Literal::String(s) if s == NIL => s.clone(),
            Literal::String(s) => format!("'{}'", s),
            Literal::Int(n) => n.to_string(),
            Literal::Float(f) => ryu::Buffer::new().format(*f).to_string(),
            Literal::Bool(b) => b.to_string(),
        }
    }
}

// =============================================================================
// JSON Decoding
// =============================================================================

impl Expr {
    /// Decode the JSON wire format into a typed expression tree.
    ///
    /// Arrays are field references (`["field", id]`) or operations; scalars
    /// are literals. All shape and arity validation happens here, so
    /// `to_clause()` runs on well-formed trees.
    pub fn from_value(value: &Value) -> GenerateResult<Self> {
        match value {
            Value::Array(items) => Self::decode_array(items),
            Value::String(s) => Ok(lit_str(s.clone())),
            Value::Bool(b) => Ok(lit_bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(lit_int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(lit_float(f))
                } else {
                    Err(GenerateError::MalformedExpression(format!(
                        "unrepresentable number: {}",
                        n
                    )))
                }
            }
            other => Err(GenerateError::MalformedExpression(format!(
                "cannot decode {} as an expression",
                other
            ))),
        }
    }

    fn decode_array(items: &[Value]) -> GenerateResult<Self> {
        let head = items.first().and_then(Value::as_str).ok_or_else(|| {
            GenerateError::MalformedExpression(
                "operation must start with an operator token".to_string(),
            )
        })?;

        if head == FIELD_TAG {
            return Self::decode_field(items);
        }

        let op = Operator::from_token(head)
            .ok_or_else(|| GenerateError::OperatorNotSupported(head.to_string()))?;
        let args = items[1..]
            .iter()
            .map(Expr::from_value)
            .collect::<GenerateResult<Vec<_>>>()?;
        op.check_arity(args.len())?;

        Ok(Expr::Op { op, args })
    }

    /// Correct shape is `["field", <non-negative integer>]`.
    fn decode_field(items: &[Value]) -> GenerateResult<Self> {
        if items.len() == 2 {
            if let Some(id) = items[1].as_u64().and_then(|id| u32::try_from(id).ok()) {
                return Ok(Expr::Field(id));
            }
        }
        Err(GenerateError::MalformedFieldReference(format!(
            "field data: {}",
            Value::Array(items.to_vec())
        )))
    }
}

// =============================================================================
// Clause Compilation
// =============================================================================

impl Expr {
    /// Compile this expression into a fully parenthesized SQL boolean clause.
    ///
    /// Every branch returns text wrapped in exactly one parenthesis pair, so
    /// nested clauses compose into `((...) AND (...))`-style output with no
    /// precedence ambiguity.
    pub fn to_clause(&self, fields: &FieldTable, dialect: Dialect) -> GenerateResult<String> {
        match self {
            Expr::Op { op, args } => compile_op(*op, args, fields, dialect),
            // Only operations are clauses. The wire format dispatches on the
            // head token, so a field reference in clause position reads as an
            // unrecognized "field" operator.
            Expr::Field(_) => Err(GenerateError::OperatorNotSupported(FIELD_TAG.to_string())),
            Expr::Literal(lit) => Err(GenerateError::MalformedExpression(format!(
                "literal {} cannot stand alone as a clause",
                lit.render()
            ))),
        }
    }
}

fn compile_op(
    op: Operator,
    args: &[Expr],
    fields: &FieldTable,
    dialect: Dialect,
) -> GenerateResult<String> {
    match op {
        Operator::And | Operator::Or => match args {
            [] => Err(arity_error(op, 0)),
            // A connective with a single operand is redundant: ignore it and
            // compile the sole operand directly.
            [sole] => sole.to_clause(fields, dialect),
            _ => {
                let joiner = match op {
                    Operator::And => " AND ",
                    _ => " OR ",
                };
                let parts = args
                    .iter()
                    .map(|arg| arg.to_clause(fields, dialect))
                    .collect::<GenerateResult<Vec<_>>>()?;
                Ok(surround(&parts.join(joiner)))
            }
        },

        Operator::Not => {
            let [operand] = args else {
                return Err(arity_error(op, args.len()));
            };
            Ok(surround(&format!(
                "NOT {}",
                operand.to_clause(fields, dialect)?
            )))
        }

        Operator::Lt | Operator::Gt => {
            let [left, right] = args else {
                return Err(arity_error(op, args.len()));
            };
            // Strict comparison, never NULL-rewritten.
            let l = resolve_operand(left, fields, dialect)?;
            let r = resolve_operand(right, fields, dialect)?;
            Ok(surround(&format!("{} {} {}", l, op.token(), r)))
        }

        Operator::Eq | Operator::Ne => match args {
            [left, right] => compile_comparison(op, left, right, fields, dialect),
            [subject, values @ ..] if values.len() >= 2 => {
                compile_membership(op, subject, values, fields, dialect)
            }
            _ => Err(arity_error(op, args.len())),
        },

        Operator::IsEmpty | Operator::NotEmpty => {
            let [operand] = args else {
                return Err(arity_error(op, args.len()));
            };
            compile_null_check(op, operand, fields, dialect)
        }
    }
}

/// Two-operand `=` / `!=` with the equality/NULL rewrite.
fn compile_comparison(
    op: Operator,
    left: &Expr,
    right: &Expr,
    fields: &FieldTable,
    dialect: Dialect,
) -> GenerateResult<String> {
    let l = resolve_operand(left, fields, dialect)?;
    let r = resolve_operand(right, fields, dialect)?;

    if l != NIL && r != NIL {
        return Ok(surround(&format!("{} {} {}", l, op.token(), r)));
    }

    // Either side rendered as the NULL sentinel: discard the comparison and
    // null-check whichever operand was not the sentinel. The match is on the
    // rendered text, so a column literally named nil still quotes and never
    // collides with the marker.
    let checked = if l != NIL { left } else { right };
    let null_op = match op {
        Operator::Eq => Operator::IsEmpty,
        _ => Operator::NotEmpty,
    };
    compile_null_check(null_op, checked, fields, dialect)
}

/// Variadic `=` / `!=` compiled as `IN` / `NOT IN`.
///
/// The value list is rendered as-is; the NULL rewrite does not apply inside
/// membership.
fn compile_membership(
    op: Operator,
    subject: &Expr,
    values: &[Expr],
    fields: &FieldTable,
    dialect: Dialect,
) -> GenerateResult<String> {
    let head = resolve_operand(subject, fields, dialect)?;
    let rendered = values
        .iter()
        .map(|value| resolve_operand(value, fields, dialect))
        .collect::<GenerateResult<Vec<_>>>()?;
    let keyword = match op {
        Operator::Eq => "IN",
        _ => "NOT IN",
    };
    Ok(surround(&format!(
        "{} {} ({})",
        head,
        keyword,
        rendered.join(", ")
    )))
}

/// `is-empty` / `not-empty` compiled as `IS NULL` / `IS NOT NULL`.
fn compile_null_check(
    op: Operator,
    operand: &Expr,
    fields: &FieldTable,
    dialect: Dialect,
) -> GenerateResult<String> {
    let target = resolve_operand(operand, fields, dialect)?;
    let keyword = match op {
        Operator::IsEmpty => "IS NULL",
        _ => "IS NOT NULL",
    };
    Ok(surround(&format!("{} {}", target, keyword)))
}

/// Resolve an operand to its SQL text: a field reference through the field
/// table plus dialect quoting, a literal through `Literal::render()`.
///
/// An operation in operand position is a malformed field reference - operands
/// of a comparison must be fields or literals.
fn resolve_operand(operand: &Expr, fields: &FieldTable, dialect: Dialect) -> GenerateResult<String> {
    match operand {
        Expr::Field(id) => {
            let column = fields
                .column(*id)
                .ok_or(GenerateError::FieldNotFound(*id))?;
            Ok(dialect.quote_identifier(column))
        }
        Expr::Literal(lit) => Ok(lit.render()),
        Expr::Op { op, .. } => Err(GenerateError::MalformedFieldReference(format!(
            "expected a field reference or literal, found '{}' operation",
            op.token()
        ))),
    }
}

fn surround(clause: &str) -> String {
    format!("({})", clause)
}

fn arity_error(op: Operator, count: usize) -> GenerateError {
    GenerateError::MalformedExpression(format!(
        "wrong number of operands for '{}': {}",
        op.token(),
        count
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> FieldTable {
        FieldTable::from([(1, "id"), (2, "name"), (3, "date_joined"), (4, "age")])
    }

    #[test]
    fn test_render_string_literal() {
        assert_eq!(lit_str("cam"), Expr::Literal(Literal::String("cam".into())));
        assert_eq!(Literal::String("cam".into()).render(), "'cam'");
    }

    #[test]
    fn test_render_nil_is_never_quoted() {
        assert_eq!(Literal::String(NIL.into()).render(), "nil");
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(Literal::Int(25).render(), "25");
        assert_eq!(Literal::Float(25.5).render(), "25.5");
        // ryu keeps the trailing .0 on whole floats
        assert_eq!(Literal::Float(3.0).render(), "3.0");
    }

    #[test]
    fn test_render_bool() {
        assert_eq!(Literal::Bool(true).render(), "true");
        assert_eq!(Literal::Bool(false).render(), "false");
    }

    #[test]
    fn test_render_string_embedded_quote_passes_through() {
        // No escaping - the documented injection contract.
        assert_eq!(Literal::String("o'brien".into()).render(), "'o'brien'");
    }

    #[test]
    fn test_decode_field_reference() {
        let expr = Expr::from_value(&json!(["field", 2])).unwrap();
        assert_eq!(expr, Expr::Field(2));
    }

    #[test]
    fn test_decode_field_reference_bad_shape() {
        for value in [json!(["field", "x"]), json!(["field"]), json!(["field", 2, 3])] {
            let err = Expr::from_value(&value).unwrap_err();
            assert!(
                matches!(err, GenerateError::MalformedFieldReference(_)),
                "value {value} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_unknown_operator() {
        let err = Expr::from_value(&json!(["like", ["field", 2], "cam%"])).unwrap_err();
        assert_eq!(err, GenerateError::OperatorNotSupported("like".to_string()));
    }

    #[test]
    fn test_decode_arity_violation() {
        let err = Expr::from_value(&json!(["not", ["is-empty", ["field", 1]], ["is-empty", ["field", 2]]]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::MalformedExpression(_)));
    }

    #[test]
    fn test_decode_null_literal_rejected() {
        // JSON null is not the sentinel; the sentinel is the string "nil".
        let err = Expr::from_value(&json!(["=", ["field", 2], null])).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedExpression(_)));
    }

    #[test]
    fn test_compile_comparison_postgres() {
        let expr = Expr::op(Operator::Eq, vec![field(2), lit_str("cam")]);
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(\"name\" = 'cam')");
    }

    #[test]
    fn test_compile_comparison_mysql_backticks() {
        let expr = Expr::op(Operator::Gt, vec![field(4), lit_int(35)]);
        let clause = expr.to_clause(&fields(), Dialect::MySql).unwrap();
        assert_eq!(clause, "(`age` > 35)");
    }

    #[test]
    fn test_null_rewrite_eq() {
        // ["=", fieldRef, "nil"] compiles identically to ["is-empty", fieldRef]
        let rewritten = Expr::op(Operator::Eq, vec![field(3), nil()]);
        let direct = Expr::op(Operator::IsEmpty, vec![field(3)]);
        let table = fields();
        assert_eq!(
            rewritten.to_clause(&table, Dialect::Postgres).unwrap(),
            direct.to_clause(&table, Dialect::Postgres).unwrap(),
        );
        assert_eq!(
            direct.to_clause(&table, Dialect::Postgres).unwrap(),
            "(\"date_joined\" IS NULL)"
        );
    }

    #[test]
    fn test_null_rewrite_ne_with_sentinel_on_left() {
        let expr = Expr::op(Operator::Ne, vec![nil(), field(3)]);
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(\"date_joined\" IS NOT NULL)");
    }

    #[test]
    fn test_null_rewrite_both_sides_nil() {
        // With both sides nil the right operand is the one checked, and the
        // bare token leaks through.
        let expr = Expr::op(Operator::Eq, vec![nil(), nil()]);
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(nil IS NULL)");
    }

    #[test]
    fn test_strict_comparison_skips_null_rewrite() {
        let expr = Expr::op(Operator::Gt, vec![field(4), nil()]);
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(\"age\" > nil)");
    }

    #[test]
    fn test_membership() {
        let expr = Expr::op(
            Operator::Eq,
            vec![field(4), lit_int(25), lit_int(26), lit_int(27)],
        );
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(\"age\" IN (25, 26, 27))");
    }

    #[test]
    fn test_membership_negated() {
        let expr = Expr::op(
            Operator::Ne,
            vec![field(2), lit_str("cam"), lit_str("joe"), lit_str("sam")],
        );
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(\"name\" NOT IN ('cam', 'joe', 'sam'))");
    }

    #[test]
    fn test_nested_connectives_fully_parenthesized() {
        let expr = Expr::op(
            Operator::And,
            vec![
                Expr::op(Operator::Lt, vec![field(1), lit_int(5)]),
                Expr::op(Operator::Eq, vec![field(2), lit_str("joe")]),
            ],
        );
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "((\"id\" < 5) AND (\"name\" = 'joe'))");
    }

    #[test]
    fn test_not_wraps_inner_clause() {
        let expr = Expr::op(
            Operator::Not,
            vec![Expr::op(Operator::Eq, vec![field(4), lit_int(25)])],
        );
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "(NOT (\"age\" = 25))");
    }

    #[test]
    fn test_single_operand_connective_compiles_sole_operand() {
        // A one-operand connective is ignored; only the operand compiles.
        let sole = Expr::op(Operator::Eq, vec![field(2), lit_str("cam")]);
        let expr = Expr::op(Operator::Or, vec![sole.clone()]);
        let table = fields();
        assert_eq!(
            expr.to_clause(&table, Dialect::Postgres).unwrap(),
            sole.to_clause(&table, Dialect::Postgres).unwrap(),
        );
    }

    #[test]
    fn test_unknown_field_id() {
        let expr = Expr::op(Operator::Eq, vec![field(42), lit_int(1)]);
        let err = expr.to_clause(&fields(), Dialect::Postgres).unwrap_err();
        assert_eq!(err, GenerateError::FieldNotFound(42));
    }

    #[test]
    fn test_field_in_clause_position() {
        let err = field(2).to_clause(&fields(), Dialect::Postgres).unwrap_err();
        assert_eq!(err, GenerateError::OperatorNotSupported("field".to_string()));
    }

    #[test]
    fn test_operation_in_operand_position() {
        let nested = Expr::op(Operator::IsEmpty, vec![field(2)]);
        let expr = Expr::op(Operator::Eq, vec![nested, lit_int(1)]);
        let err = expr.to_clause(&fields(), Dialect::Postgres).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedFieldReference(_)));
    }

    #[test]
    fn test_operand_order_preserved() {
        let expr = Expr::op(Operator::Eq, vec![lit_str("cam"), field(2)]);
        let clause = expr.to_clause(&fields(), Dialect::Postgres).unwrap();
        assert_eq!(clause, "('cam' = \"name\")");
    }
}
