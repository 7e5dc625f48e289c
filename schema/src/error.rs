use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Stable codes for schema validation failures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    EmptySchema,
    EmptyStruct,
    UnknownType,
    NestedOptional,
    CircularReference,
    InvalidIdentifier,
    ReservedKeyword,
    DuplicateStruct,
    DuplicateField,
    TooManyStructs,
    NameCollision,
}

impl ValidationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptySchema => "EMPTY_SCHEMA",
            Self::EmptyStruct => "EMPTY_STRUCT",
            Self::UnknownType => "UNKNOWN_TYPE",
            Self::NestedOptional => "NESTED_OPTIONAL",
            Self::CircularReference => "CIRCULAR_REFERENCE",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::ReservedKeyword => "RESERVED_KEYWORD",
            Self::DuplicateStruct => "DUPLICATE_STRUCT",
            Self::DuplicateField => "DUPLICATE_FIELD",
            Self::TooManyStructs => "TOO_MANY_STRUCTS",
            Self::NameCollision => "NAME_COLLISION",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ValidationError {
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// All validation failures of one schema, in the order the rules found them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "schema validation failed:")?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse schema: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// A dynamic value that does not match the schema type it is used with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: expected {expected}, found {found}")]
pub struct ValueError {
    pub path: String,
    pub expected: String,
    pub found: String,
}
