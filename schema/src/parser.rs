use crate::{
    ast::{FieldDecl, SchemaAst, StructDecl, TypeAst},
    error::ParseError,
    lexer::{tokenize, Token, TokenKind},
    types::Primitive,
};

/// Parses `.sdp` schema text.
///
/// ```text
/// Schema   = { Struct }
/// Struct   = { DocComment } "struct" Ident "{" [ Field { "," Field } [ "," ] ] "}"
/// Field    = { DocComment } Ident ":" TypeExpr
/// TypeExpr = "[" "]" TypeExpr | "Option" "<" TypeExpr ">" | Ident
/// ```
pub fn parse_schema_ast(input: &str) -> Result<SchemaAst, ParseError> {
    let input = input.replace("\r\n", "\n");
    let tokens = tokenize(&input)?;
    Parser { tokens, pos: 0 }.schema()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // the token list always ends with Eof, which is never consumed
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().kind.clone();
        if kind != TokenKind::Eof {
            self.pos += 1;
        }
        kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn error(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            line: token.line,
            column: token.column,
            message: format!("expected {expected}, got {}", token.kind.describe()),
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(expected)),
        }
    }

    fn doc_comments(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        while let TokenKind::DocComment(text) = &self.peek().kind {
            lines.push(text.clone());
            self.advance();
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    fn schema(mut self) -> Result<SchemaAst, ParseError> {
        let mut structs = Vec::new();
        loop {
            let comment = self.doc_comments();
            if self.check(&TokenKind::Eof) {
                return Ok(SchemaAst { structs });
            }
            structs.push(self.struct_decl(comment)?);
        }
    }

    fn struct_decl(&mut self, comment: Option<String>) -> Result<StructDecl, ParseError> {
        self.expect(&TokenKind::Struct, "'struct'")?;
        let name = self.ident("struct name")?;
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        loop {
            let field_comment = self.doc_comments();
            if self.eat(&TokenKind::RBrace) {
                break;
            }
            fields.push(self.field_decl(field_comment)?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBrace, "',' or '}'")?;
                break;
            }
        }

        Ok(StructDecl {
            name,
            fields,
            comment,
        })
    }

    fn field_decl(&mut self, comment: Option<String>) -> Result<FieldDecl, ParseError> {
        let name = self.ident("field name")?;
        self.expect(&TokenKind::Colon, "':'")?;
        let ty = self.type_expr()?;
        Ok(FieldDecl { name, ty, comment })
    }

    fn type_expr(&mut self) -> Result<TypeAst, ParseError> {
        if self.eat(&TokenKind::LBracket) {
            self.expect(&TokenKind::RBracket, "']' after '['")?;
            return Ok(TypeAst::Array(Box::new(self.type_expr()?)));
        }
        let name = self.ident("type name")?;
        if name == "Option" && self.eat(&TokenKind::LAngle) {
            let inner = self.type_expr()?;
            self.expect(&TokenKind::RAngle, "'>'")?;
            return Ok(TypeAst::Optional(Box::new(inner)));
        }
        Ok(match Primitive::from_name(&name) {
            Some(primitive) => TypeAst::Primitive(primitive),
            None => TypeAst::Named(name),
        })
    }
}
