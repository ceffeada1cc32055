//! Error taxonomy for filter compilation.

use thiserror::Error;

/// Result type for compilation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while compiling a filter expression to SQL.
///
/// Every error aborts the compile at the point of detection. There is no
/// partial output and no recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The dialect string is not one of the supported dialects.
    #[error("dialect '{0}' is not supported")]
    UnknownDialect(String),

    /// An operand tagged as a field reference has the wrong shape.
    ///
    /// The correct shape is `["field", <field_id>]`.
    #[error("malformed field reference: {0}")]
    MalformedFieldReference(String),

    /// A referenced field ID is absent from the field table.
    #[error("field with ID {0} does not exist")]
    FieldNotFound(u32),

    /// An operator token is not in the recognized grammar.
    #[error("operator '{0}' does not exist")]
    OperatorNotSupported(String),

    /// The expression tree is structurally invalid: wrong operand count for
    /// an operator, a literal in clause position, or a JSON shape that does
    /// not decode to any expression node.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}
