use crate::field_type::{FieldType, Operator};

/// Problems in a field schema. These are authoring mistakes, reported by
/// `FieldSchema::validate` and never raised while a screen is in use.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    DuplicateField(String),
    MissingOptionSource(String),
    UnexpectedOptionSource(String, FieldType),
    EmptyOperators(String),
    DefaultOperatorNotOffered(String, Operator),
    Parse(String),
    UnknownFormat(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::DuplicateField(name) => {
                write!(f, "Field '{}' is declared more than once", name)
            }
            SchemaError::MissingOptionSource(name) => write!(
                f,
                "Dropdown field '{}' needs either staticOptions or a remote endpoint",
                name
            ),
            SchemaError::UnexpectedOptionSource(name, field_type) => write!(
                f,
                "Field '{}' has type {} but carries a dropdownConfig",
                name, field_type
            ),
            SchemaError::EmptyOperators(name) => {
                write!(f, "Field '{}' declares an empty operator list", name)
            }
            SchemaError::DefaultOperatorNotOffered(name, op) => write!(
                f,
                "Default operator '{}' of field '{}' is not in its operator list",
                op, name
            ),
            SchemaError::Parse(msg) => write!(f, "Schema parse error: {}", msg),
            SchemaError::UnknownFormat(path) => write!(
                f,
                "Cannot tell schema format of '{}'. Use a .json, .yaml, .yml or .toml file",
                path
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Rejected edit to a filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    UnknownField(String),
    OperatorNotOffered(String, Operator),
    /// NaN or infinite value for a number field
    InvalidNumber(String, f64),
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::UnknownField(name) => write!(f, "Unknown filter field: {}", name),
            FilterError::OperatorNotOffered(name, op) => {
                write!(f, "Operator '{}' is not offered for field '{}'", op, name)
            }
            FilterError::InvalidNumber(name, value) => {
                write!(f, "Field '{}' needs a finite number, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Remote dropdown payload that could not be mapped into options.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionPayloadError {
    NotAList,
    MissingField { index: usize, field: String },
    UnsupportedValue { index: usize, field: String },
}

impl std::fmt::Display for OptionPayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionPayloadError::NotAList => {
                write!(f, "Expected a list or an object with a 'data' list")
            }
            OptionPayloadError::MissingField { index, field } => {
                write!(f, "Record {} has no '{}' field", index, field)
            }
            OptionPayloadError::UnsupportedValue { index, field } => write!(
                f,
                "Record {} has a '{}' value that is neither a string nor a number",
                index, field
            ),
        }
    }
}

impl std::error::Error for OptionPayloadError {}
