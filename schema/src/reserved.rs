use std::collections::HashSet;

use lazy_static::lazy_static;

/// A generator target whose identifiers schema names must not collide with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Language {
    Go,
    Rust,
    C,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::Go, Self::Rust, Self::C];

    pub fn name(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::C => "C",
        }
    }

    fn keywords(self) -> &'static HashSet<&'static str> {
        match self {
            Self::Go => &*GO_KEYWORDS,
            Self::Rust => &*RUST_KEYWORDS,
            Self::C => &*C_KEYWORDS,
        }
    }
}

lazy_static! {
    static ref GO_KEYWORDS: HashSet<&'static str> = [
        "break", "default", "func", "interface", "select", "case", "defer", "go", "map",
        "struct", "chan", "else", "goto", "package", "switch", "const", "fallthrough", "if",
        "range", "type", "continue", "for", "import", "return", "var",
        // predeclared identifiers generated code relies on
        "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int", "int8",
        "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32",
        "uint64", "uintptr", "true", "false", "iota", "nil", "append", "cap", "close",
        "complex", "copy", "delete", "imag", "len", "make", "new", "panic", "print", "println",
        "real", "recover", "main", "init",
    ]
    .into_iter()
    .collect();

    static ref RUST_KEYWORDS: HashSet<&'static str> = [
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
        "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
        "use", "where", "while", "abstract", "async", "await", "become", "box", "do", "final",
        "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield", "union",
        "dyn", "raw",
        // prelude names generated code relies on
        "Option", "Result", "Some", "None", "Ok", "Err", "String", "Vec", "Box", "Rc", "Arc",
        "Copy", "Clone", "Send", "Sync", "Sized",
    ]
    .into_iter()
    .collect();

    static ref C_KEYWORDS: HashSet<&'static str> = [
        "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
        "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
        "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "typedef", "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof",
        "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert",
        "_Thread_local", "bool", "true", "false", "NULL", "size_t", "ptrdiff_t", "wchar_t",
        "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t",
        "uint64_t", "FILE", "EOF",
    ]
    .into_iter()
    .collect();
}

/// Top-level names the Rust backend defines besides one type per struct.
pub const RUST_RUNTIME_NAMES: &[&str] = &["AnyMessage"];

/// Top-level names of the runtime prelude at the head of every generated Go file.
pub const GO_RUNTIME_NAMES: &[&str] = &[
    "MaxSerializedSize",
    "MaxArrayElements",
    "MaxTotalElements",
    "MessageMagic",
    "MessageVersion",
    "MessageHeaderSize",
    "ErrUnexpectedEOF",
    "ErrInvalidMagic",
    "ErrInvalidVersion",
    "ErrUnknownMessageType",
    "ErrInvalidUTF8",
    "ErrInvalidBoolValue",
    "ErrInvalidPresenceFlag",
    "ErrArrayTooLarge",
    "ErrTooManyElements",
    "ErrDataTooLarge",
    "DecodeContext",
    "DecodeMessage",
    "encoder",
    "decoder",
    "parseHeader",
    "frameMessage",
];

/// Top-level Go identifiers generated for the struct whose Go type name is `name`.
pub fn go_struct_names(name: &str) -> [String; 9] {
    [
        name.to_owned(),
        format!("{name}TypeID"),
        format!("calculate{name}Size"),
        format!("Encode{name}"),
        format!("encode{name}"),
        format!("Decode{name}"),
        format!("decode{name}"),
        format!("Encode{name}Message"),
        format!("Decode{name}Message"),
    ]
}

/// Languages in which `name` is reserved. Empty if the name is usable everywhere.
pub fn reserved_in(name: &str) -> Vec<Language> {
    Language::ALL
        .into_iter()
        .filter(|language| language.keywords().contains(name))
        .collect()
}
