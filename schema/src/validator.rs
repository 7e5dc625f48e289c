use std::collections::{hash_map::Entry, HashMap, HashSet};

use heck::{ToPascalCase, ToSnakeCase};
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::{SchemaAst, StructDecl, TypeAst},
    error::{ValidationCode, ValidationError},
    reserved,
};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Runs every validation rule and returns all violations.
///
/// Rules run in a fixed order (structure, type references, cycles, naming) and do not stop at
/// the first error, so a schema author sees every problem at once.
pub fn validate(schema: &SchemaAst) -> Vec<ValidationError> {
    let mut errors = validate_structure(schema);
    if schema.structs.is_empty() {
        return errors;
    }
    errors.extend(validate_type_references(schema));
    errors.extend(detect_cycles(schema));
    errors.extend(validate_naming(schema));
    errors.extend(validate_generated_names(schema));
    tracing::debug!(
        structs = schema.structs.len(),
        errors = errors.len(),
        "validated schema"
    );
    errors
}

pub fn validate_structure(schema: &SchemaAst) -> Vec<ValidationError> {
    use ValidationCode::*;

    let mut errors = Vec::new();
    if schema.structs.is_empty() {
        errors.push(ValidationError::new(
            EmptySchema,
            "schema must define at least one struct",
        ));
        return errors;
    }
    if schema.structs.len() > usize::from(u16::MAX) {
        errors.push(ValidationError::new(
            TooManyStructs,
            format!(
                "schema defines {} structs, type ids only cover {}",
                schema.structs.len(),
                u16::MAX
            ),
        ));
    }
    for s in &schema.structs {
        if s.fields.is_empty() {
            errors.push(ValidationError::new(
                EmptyStruct,
                format!("struct {:?} cannot be empty (must have at least one field)", s.name),
            ));
        }
    }
    errors
}

pub fn validate_type_references(schema: &SchemaAst) -> Vec<ValidationError> {
    fn visit(
        ty: &TypeAst,
        inside_optional: bool,
        names: &HashSet<&str>,
        context: (&str, &str),
        errors: &mut Vec<ValidationError>,
    ) {
        let (struct_name, field_name) = context;
        match ty {
            TypeAst::Primitive(_) => {}
            TypeAst::Named(name) => {
                if !names.contains(name.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationCode::UnknownType,
                        format!(
                            "struct {struct_name:?} field {field_name:?}: unknown type {name:?}"
                        ),
                    ));
                }
            }
            TypeAst::Array(element) => visit(element, false, names, context, errors),
            TypeAst::Optional(inner) => {
                if inside_optional {
                    errors.push(ValidationError::new(
                        ValidationCode::NestedOptional,
                        format!(
                            "struct {struct_name:?} field {field_name:?}: Option<Option<T>> is not representable"
                        ),
                    ));
                }
                visit(inner, true, names, context, errors);
            }
        }
    }

    let names = schema
        .structs
        .iter()
        .map(|s| s.name.as_str())
        .collect::<HashSet<_>>();
    let mut errors = Vec::new();
    for s in &schema.structs {
        for field in &s.fields {
            visit(
                &field.ty,
                false,
                &names,
                (&s.name, &field.name),
                &mut errors,
            );
        }
    }
    errors
}

/// Finds structs that contain themselves, directly or through other structs.
///
/// Arrays and optionals do not break a cycle: the wire format has no references, and generated
/// types must have a finite size in every target language.
pub fn detect_cycles(schema: &SchemaAst) -> Vec<ValidationError> {
    #[derive(Copy, Clone, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn references(s: &StructDecl) -> Vec<&str> {
        let mut refs = Vec::new();
        for field in &s.fields {
            field.ty.for_each_named(&mut |name| {
                if !refs.contains(&name) {
                    refs.push(name);
                }
            });
        }
        refs
    }

    fn visit<'a>(
        name: &'a str,
        graph: &HashMap<&'a str, Vec<&'a str>>,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
        errors: &mut Vec<ValidationError>,
    ) {
        marks.insert(name, Mark::InProgress);
        path.push(name);
        for &next in graph.get(name).into_iter().flatten() {
            match marks.get(next).copied() {
                // unknown types are reported by validate_type_references
                None => {}
                Some(Mark::Unvisited) => visit(next, graph, marks, path, errors),
                Some(Mark::InProgress) => {
                    let start = path.iter().position(|&n| n == next).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(next);
                    errors.push(ValidationError::new(
                        ValidationCode::CircularReference,
                        format!("circular reference detected: {}", cycle.join(" -> ")),
                    ));
                }
                Some(Mark::Done) => {}
            }
        }
        path.pop();
        marks.insert(name, Mark::Done);
    }

    let graph = schema
        .structs
        .iter()
        .map(|s| (s.name.as_str(), references(s)))
        .collect::<HashMap<_, _>>();
    let mut marks = schema
        .structs
        .iter()
        .map(|s| (s.name.as_str(), Mark::Unvisited))
        .collect::<HashMap<_, _>>();

    let mut errors = Vec::new();
    for s in &schema.structs {
        if marks.get(s.name.as_str()) == Some(&Mark::Unvisited) {
            visit(&s.name, &graph, &mut marks, &mut Vec::new(), &mut errors);
        }
    }
    errors
}

pub fn validate_naming(schema: &SchemaAst) -> Vec<ValidationError> {
    use ValidationCode::*;

    fn check_identifier(kind: &str, name: &str, errors: &mut Vec<ValidationError>) {
        if !IDENTIFIER.is_match(name) {
            errors.push(ValidationError::new(
                InvalidIdentifier,
                format!(
                    "{kind} name {name:?} is invalid: must start with a letter or underscore and contain only ASCII letters, digits and underscores"
                ),
            ));
        }
        let languages = reserved::reserved_in(name);
        if !languages.is_empty() {
            let languages = languages
                .iter()
                .map(|l| l.name())
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(ValidationError::new(
                ReservedKeyword,
                format!("{kind} name {name:?} is a reserved keyword (reserved in: {languages})"),
            ));
        }
    }

    let mut errors = Vec::new();
    let mut struct_names = HashSet::new();
    for s in &schema.structs {
        if !struct_names.insert(s.name.as_str()) {
            errors.push(ValidationError::new(
                DuplicateStruct,
                format!("duplicate struct name {:?}", s.name),
            ));
        }
        check_identifier("struct", &s.name, &mut errors);

        let mut field_names = HashSet::new();
        for field in &s.fields {
            if !field_names.insert(field.name.as_str()) {
                errors.push(ValidationError::new(
                    DuplicateField,
                    format!("struct {:?} has duplicate field name {:?}", s.name, field.name),
                ));
            }
            check_identifier(&format!("struct {:?} field", s.name), &field.name, &mut errors);
        }
    }
    errors
}

/// Checks the names backends derive from the schema. Struct names become PascalCase types,
/// fields become snake_case in Rust and PascalCase in Go, and every Go struct also yields its
/// `EncodeX`/`DecodeX` family of functions.
pub fn validate_generated_names(schema: &SchemaAst) -> Vec<ValidationError> {
    use ValidationCode::*;

    fn usable(name: &str) -> bool {
        name.starts_with(|c: char| c.is_ascii_alphabetic())
    }

    let mut errors = Vec::new();
    // `None` marks names of the generated runtime
    let mut owners = reserved::RUST_RUNTIME_NAMES
        .iter()
        .chain(reserved::GO_RUNTIME_NAMES)
        .map(|name| (name.to_string(), None))
        .collect::<HashMap<String, Option<&str>>>();
    let mut seen_structs = HashSet::new();

    for s in &schema.structs {
        // duplicates and malformed names are reported by validate_naming
        if !seen_structs.insert(s.name.as_str()) || !IDENTIFIER.is_match(&s.name) {
            continue;
        }
        let type_name = s.name.to_pascal_case();
        if !usable(&type_name) {
            errors.push(ValidationError::new(
                InvalidIdentifier,
                format!("struct name {:?} does not yield a usable type name", s.name),
            ));
            continue;
        }
        if type_name != s.name && reserved::reserved_in(&s.name).is_empty() {
            let languages = reserved::reserved_in(&type_name);
            if !languages.is_empty() {
                let languages = languages
                    .iter()
                    .map(|l| l.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(ValidationError::new(
                    ReservedKeyword,
                    format!(
                        "struct name {:?} becomes type {type_name:?}, a reserved name (reserved in: {languages})",
                        s.name
                    ),
                ));
            }
        }
        for generated in reserved::go_struct_names(&type_name) {
            match owners.entry(generated) {
                Entry::Vacant(entry) => {
                    entry.insert(Some(s.name.as_str()));
                }
                Entry::Occupied(entry) => {
                    let message = match entry.get() {
                        Some(other) => format!(
                            "structs {other:?} and {:?} both generate {:?}",
                            s.name,
                            entry.key()
                        ),
                        None => format!(
                            "struct {:?} generates {:?}, which generated code already defines",
                            s.name,
                            entry.key()
                        ),
                    };
                    errors.push(ValidationError::new(NameCollision, message));
                    break;
                }
            }
        }

        let mut seen_fields = HashSet::new();
        let mut rust_fields = HashMap::new();
        let mut go_fields = HashMap::new();
        for field in &s.fields {
            if !seen_fields.insert(field.name.as_str()) || !IDENTIFIER.is_match(&field.name) {
                continue;
            }
            let rust_name = field.name.to_snake_case();
            let go_name = field.name.to_pascal_case();
            if !usable(&rust_name) || !usable(&go_name) {
                errors.push(ValidationError::new(
                    InvalidIdentifier,
                    format!(
                        "struct {:?} field name {:?} does not yield a usable field name",
                        s.name, field.name
                    ),
                ));
                continue;
            }
            for (language, cased, seen) in [
                ("Rust", rust_name, &mut rust_fields),
                ("Go", go_name, &mut go_fields),
            ] {
                if let Some(other) = seen.insert(cased.clone(), field.name.as_str()) {
                    errors.push(ValidationError::new(
                        NameCollision,
                        format!(
                            "struct {:?} fields {other:?} and {:?} both generate {language} field {cased:?}",
                            s.name, field.name
                        ),
                    ));
                    break;
                }
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema_ast;

    fn codes(source: &str) -> Vec<ValidationCode> {
        let ast = parse_schema_ast(source).unwrap();
        validate(&ast).into_iter().map(|e| e.code).collect()
    }

    #[test]
    fn valid_schema_has_no_errors() {
        assert!(codes(
            "struct Point { x: f64, y: f64 }\n\
             struct Shape { points: []Point, anchor: Option<Point>, tags: Option<[]Option<str>> }"
        )
        .is_empty());
    }

    #[test]
    fn structure() {
        assert_eq!(codes(""), vec![ValidationCode::EmptySchema]);
        assert_eq!(codes("struct A {}"), vec![ValidationCode::EmptyStruct]);
    }

    #[test]
    fn unknown_and_nested_optional() {
        assert_eq!(
            codes("struct A { b: []Missing, c: Option<Option<u8>> }"),
            vec![ValidationCode::UnknownType, ValidationCode::NestedOptional]
        );
    }

    #[test]
    fn cycles_report_the_path() {
        let ast = parse_schema_ast(
            "struct A { b: B }\nstruct B { c: []C }\nstruct C { a: Option<A> }\nstruct D { d: D }",
        )
        .unwrap();
        let errors = detect_cycles(&ast);
        let messages = errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            [
                "circular reference detected: A -> B -> C -> A",
                "circular reference detected: D -> D",
            ]
        );
    }

    #[test]
    fn naming() {
        assert_eq!(
            codes("struct type { x: u8 }\nstruct A { x: u8, x: u16, len: u8 }\nstruct A { y: u8 }"),
            vec![
                ValidationCode::ReservedKeyword,
                ValidationCode::DuplicateField,
                ValidationCode::ReservedKeyword,
                ValidationCode::DuplicateStruct,
            ]
        );
    }

    #[test]
    fn cased_names_are_checked() {
        use ValidationCode::*;

        assert_eq!(
            codes("struct result { x: u8 }\nstruct vec { y: []u8 }"),
            vec![ReservedKeyword, ReservedKeyword]
        );
        assert_eq!(codes("struct decode_context { x: u8 }"), vec![NameCollision]);
        assert_eq!(codes("struct message_magic { x: u8 }"), vec![NameCollision]);
        assert_eq!(codes("struct any_message { x: u8 }"), vec![NameCollision]);
        assert_eq!(codes("struct Context { x: u8 }"), vec![NameCollision]);
        assert_eq!(codes("struct Point { x: u8 }\nstruct PointMessage { x: u8 }"), vec![NameCollision]);
        assert_eq!(
            codes("struct device_info { x: u8 }\nstruct DeviceInfo { x: u8 }"),
            vec![NameCollision]
        );
        assert_eq!(codes("struct A { x_y: u8, xY: u8 }"), vec![NameCollision]);
        assert_eq!(codes("struct _ { x: u8 }"), vec![InvalidIdentifier]);
    }

    #[test]
    fn collision_messages_name_both_sides() {
        let ast = parse_schema_ast("struct Point { x: u8 }\nstruct PointMessage { x: u8 }").unwrap();
        assert_eq!(
            validate_generated_names(&ast)[0].message,
            "structs \"Point\" and \"PointMessage\" both generate \"EncodePointMessage\""
        );
        let ast = parse_schema_ast("struct result { x: u8 }").unwrap();
        assert_eq!(
            validate_generated_names(&ast)[0].message,
            "struct name \"result\" becomes type \"Result\", a reserved name (reserved in: Rust)"
        );
    }

    #[test]
    fn invalid_identifier_in_hand_built_ast() {
        use crate::ast::FieldDecl;
        use crate::types::Primitive;

        let ast = SchemaAst {
            structs: vec![StructDecl {
                name: "9lives".into(),
                fields: vec![FieldDecl {
                    name: "ok".into(),
                    ty: TypeAst::Primitive(Primitive::U8),
                    comment: None,
                }],
                comment: None,
            }],
        };
        let errors = validate(&ast);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ValidationCode::InvalidIdentifier);
        assert!(errors[0].to_string().starts_with("[INVALID_IDENTIFIER] struct name \"9lives\""));
    }
}
