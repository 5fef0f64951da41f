use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Returns the JSON type name of a value for use in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

/// Error conditions that can occur while converting a specification.
///
/// The converter assumes well-formed OpenAPI 2.x input and does not validate
/// it; these errors only cover structural problems that make it impossible to
/// continue, such as a required field missing from the document.
#[derive(Debug)]
pub enum ConverterError {
    /// A field the conversion depends on was not found in the document.
    MissingField(String, Value),

    /// A node in the document had a different JSON type than expected.
    UnexpectedType(String, &'static str, Value),
}

impl ConverterError {
    /// Creates a new `MissingField` error.
    ///
    /// # Parameters
    /// - `field`: The name of the missing field
    /// - `node`: The node the field was expected in
    #[inline]
    pub(crate) fn missing_field<T>(field: &T, node: &Value) -> Self
    where
        T: ToString + ?Sized,
    {
        ConverterError::MissingField(field.to_string(), node.clone())
    }

    /// Creates a new `UnexpectedType` error.
    ///
    /// # Parameters
    /// - `context`: The field name or description of the offending node
    /// - `expected`: The expected JSON type name
    /// - `node`: The node that had the wrong type
    #[inline]
    pub(crate) fn unexpected_type<T>(context: &T, expected: &'static str, node: &Value) -> Self
    where
        T: ToString + ?Sized,
    {
        ConverterError::UnexpectedType(context.to_string(), expected, node.clone())
    }
}

impl Display for ConverterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverterError::MissingField(field, node) => {
                write!(
                    f,
                    "MissingField: Object {} is missing required field {}",
                    node, field
                )
            }
            ConverterError::UnexpectedType(context, expected, node) => {
                let actual_type = json_type_name(node);
                write!(
                    f,
                    "UnexpectedType: Expected '{}' to be '{}' but '{}' was found",
                    context, expected, actual_type
                )
            }
        }
    }
}

impl std::error::Error for ConverterError {}
