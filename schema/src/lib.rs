//! Schema model for Serial Data Protocol.
//!
//! `.sdp` text is parsed into an [`ast::SchemaAst`], validated, and resolved into a [`Schema`]
//! whose structs carry their message type ids. The [`codec`] and [`message`] modules encode and
//! decode [`Value`]s against a schema without generated code.

pub mod ast;
pub mod codec;
pub mod error;
pub mod message;
pub mod parser;
pub mod reserved;
pub mod schema;
pub mod types;
pub mod validator;
pub mod value;

mod lexer;

use std::{fs, path::Path};

pub use error::{
    ParseError, SchemaError, ValidationCode, ValidationError, ValidationErrors, ValueError,
};
pub use schema::{Field, Schema, Struct};
pub use types::{Primitive, StructId, TypeExpr, TypeKind};
pub use value::{StructValue, Value};

/// Parses, validates and resolves schema text.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
    let ast = parser::parse_schema_ast(text)?;
    Schema::from_ast(ast)
}

pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading schema");
    let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_owned(),
        source,
    })?;
    let schema = parse_schema(&text)?;
    tracing::info!(
        path = %path.display(),
        structs = schema.structs().len(),
        "loaded schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reports_missing_file() {
        let err = load_schema("/nonexistent/schema.sdp").unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
        assert!(err.to_string().contains("schema.sdp"));
    }

    #[test]
    fn parse_errors_surface_position() {
        let err = parse_schema("struct A {\n  x: u8\n  y: u8\n}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse schema: line 3, column 3: expected ',' or '}', got identifier \"y\""
        );
    }
}
