use std::{iter::Peekable, str::CharIndices};

use crate::error::ParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Struct,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    LAngle,
    RAngle,
    /// `///` comment, text after the marker with one leading space stripped
    DocComment(String),
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier {name:?}"),
            Self::Struct => "'struct'".into(),
            Self::LBrace => "'{'".into(),
            Self::RBrace => "'}'".into(),
            Self::LBracket => "'['".into(),
            Self::RBracket => "']'".into(),
            Self::Colon => "':'".into(),
            Self::Comma => "','".into(),
            Self::LAngle => "'<'".into(),
            Self::RAngle => "'>'".into(),
            Self::DocComment(_) => "doc comment".into(),
            Self::Eof => "end of input".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Splits schema text into tokens. Regular `//` comments and whitespace are dropped; the token
/// list always ends with [`TokenKind::Eof`].
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            while self.peek_char().is_some_and(char::is_whitespace) {
                self.bump();
            }
            let (line, column) = (self.line, self.column);
            let Some((start, c)) = self.bump() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    column,
                });
                return Ok(tokens);
            };
            let kind = match c {
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ':' => TokenKind::Colon,
                ',' => TokenKind::Comma,
                '<' => TokenKind::LAngle,
                '>' => TokenKind::RAngle,
                '/' if self.peek_char() == Some('/') => {
                    self.bump();
                    let is_doc = self.peek_char() == Some('/');
                    if is_doc {
                        self.bump();
                    }
                    let text = self.rest_of_line();
                    if !is_doc {
                        continue;
                    }
                    TokenKind::DocComment(text.strip_prefix(' ').unwrap_or(text).to_owned())
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let mut end = start + c.len_utf8();
                    while let Some(c) = self.peek_char() {
                        if !(c.is_ascii_alphanumeric() || c == '_') {
                            break;
                        }
                        end += c.len_utf8();
                        self.bump();
                    }
                    match &self.input[start..end] {
                        "struct" => TokenKind::Struct,
                        ident => TokenKind::Ident(ident.to_owned()),
                    }
                }
                c => {
                    return Err(ParseError {
                        line,
                        column,
                        message: format!("unexpected character {c:?}"),
                    })
                }
            };
            tokens.push(Token { kind, line, column });
        }
    }

    fn rest_of_line(&mut self) -> &'a str {
        let start = self.chars.peek().map_or(self.input.len(), |&(i, _)| i);
        let mut end = start;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            end += c.len_utf8();
            self.bump();
        }
        self.input[start..end].trim_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_struct() {
        assert_eq!(
            kinds("struct A { x: []Option<u8>, }"),
            vec![
                TokenKind::Struct,
                TokenKind::Ident("A".into()),
                TokenKind::LBrace,
                TokenKind::Ident("x".into()),
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Ident("Option".into()),
                TokenKind::LAngle,
                TokenKind::Ident("u8".into()),
                TokenKind::RAngle,
                TokenKind::Comma,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("// plain\n///  doc text  \n/// more\nstructure"),
            vec![
                TokenKind::DocComment(" doc text".into()),
                TokenKind::DocComment("more".into()),
                TokenKind::Ident("structure".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn positions() {
        let tokens = tokenize("struct\n  Foo").unwrap();
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = tokenize("struct A {\n  x: u8;\n}").unwrap_err();
        assert_eq!((err.line, err.column), (2, 8));
    }
}
