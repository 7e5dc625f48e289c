use syn::{
    Attribute, Field, FieldMutability, Ident, Item, LitInt, Type, __private::Span, parse_quote,
};

use sdp_schema::{Primitive, Struct, StructId, TypeExpr, TypeKind};

use super::common::{Backend, GeneratorContext, GENERATED_BY};

use check_keyword::CheckKeyword;
use heck::{ToPascalCase, ToSnakeCase};

/// Emits one Rust module on top of the `sdp-wire` runtime crate.
pub(super) struct RustBackend;

impl RustBackend {
    pub(super) fn new() -> Self {
        Self
    }

    fn name_to_ident(name: &str) -> Ident {
        if ["crate", "self", "super", "Self"].contains(&name) {
            // These are keywords that are not allowed as raw identifiers
            Ident::new(&format!("{}_", name), Span::call_site())
        } else if name.is_keyword() {
            Ident::new_raw(name, Span::call_site())
        } else {
            Ident::new(name, Span::call_site())
        }
    }

    fn type_ident(ctx: &GeneratorContext, id: StructId) -> Ident {
        Self::name_to_ident(&ctx.struct_name(id).to_pascal_case())
    }

    fn field_ident(name: &str) -> Ident {
        Self::name_to_ident(&name.to_snake_case())
    }

    fn field_idents(def: &Struct) -> Vec<Ident> {
        def.fields
            .iter()
            .map(|field| Self::field_ident(&field.name))
            .collect()
    }

    fn type_id_literal(id: StructId) -> LitInt {
        LitInt::new(&id.type_id().to_string(), Span::call_site())
    }

    fn doc_attrs(comment: Option<&str>) -> Vec<Attribute> {
        comment
            .into_iter()
            .flat_map(str::lines)
            .map(|line| {
                let line = format!(" {line}");
                parse_quote!(#[doc = #line])
            })
            .collect()
    }

    fn primitive_type(primitive: Primitive) -> Type {
        match primitive {
            Primitive::U8 => parse_quote!(u8),
            Primitive::U16 => parse_quote!(u16),
            Primitive::U32 => parse_quote!(u32),
            Primitive::U64 => parse_quote!(u64),
            Primitive::I8 => parse_quote!(i8),
            Primitive::I16 => parse_quote!(i16),
            Primitive::I32 => parse_quote!(i32),
            Primitive::I64 => parse_quote!(i64),
            Primitive::F32 => parse_quote!(f32),
            Primitive::F64 => parse_quote!(f64),
            Primitive::Bool => parse_quote!(bool),
            Primitive::Str => parse_quote!(::std::string::String),
        }
    }

    fn field_type(ctx: &GeneratorContext, ty: &TypeExpr) -> Type {
        let type_: Type = match &ty.kind {
            TypeKind::Primitive(primitive) => Self::primitive_type(*primitive),
            TypeKind::Named(id) => {
                let name = Self::type_ident(ctx, *id);
                parse_quote!(#name)
            }
            TypeKind::Array(element) => {
                let element = Self::field_type(ctx, element);
                parse_quote!(::std::vec::Vec<#element>)
            }
        };
        if ty.optional {
            parse_quote!(::core::option::Option<#type_>)
        } else {
            type_
        }
    }
}

impl Backend for RustBackend {
    type Fragment = Item;

    fn render_prelude(&mut self, _ctx: &GeneratorContext) -> Vec<Item> {
        // generated items only refer to the runtime through absolute `sdp_wire::` paths
        Vec::new()
    }

    fn render_struct(&mut self, ctx: &GeneratorContext, def: &Struct) -> Item {
        let name = Self::type_ident(ctx, def.id);
        let docs = Self::doc_attrs(def.comment.as_deref());
        let fields = def.fields.iter().map(|field| Field {
            attrs: Self::doc_attrs(field.comment.as_deref()),
            vis: parse_quote!(pub),
            mutability: FieldMutability::None,
            ident: Some(Self::field_ident(&field.name)),
            colon_token: None,
            ty: Self::field_type(ctx, &field.ty),
        });
        parse_quote! {
            #(#docs)*
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name {
                #(#fields),*
            }
        }
    }

    fn render_encode(&mut self, ctx: &GeneratorContext, def: &Struct) -> Item {
        let name = Self::type_ident(ctx, def.id);
        let fields = Self::field_idents(def);
        parse_quote! {
            impl sdp_wire::Encode for #name {
                fn encoded_size(&self) -> usize {
                    #(sdp_wire::Encode::encoded_size(&self.#fields))+*
                }

                fn encode_into(&self, writer: &mut sdp_wire::Writer<'_>) {
                    #(sdp_wire::Encode::encode_into(&self.#fields, writer);)*
                }
            }
        }
    }

    fn render_decode(&mut self, ctx: &GeneratorContext, def: &Struct) -> Item {
        let name = Self::type_ident(ctx, def.id);
        let fields = Self::field_idents(def);
        parse_quote! {
            impl sdp_wire::Decode for #name {
                fn decode_from(
                    reader: &mut sdp_wire::Reader<'_>,
                    ctx: &mut sdp_wire::DecodeContext,
                ) -> ::core::result::Result<Self, sdp_wire::DecodeError> {
                    ::core::result::Result::Ok(Self {
                        #(#fields: sdp_wire::Decode::decode_from(reader, ctx)?,)*
                    })
                }
            }
        }
    }

    fn render_framing(&mut self, ctx: &GeneratorContext, def: &Struct) -> Item {
        let name = Self::type_ident(ctx, def.id);
        let type_id = Self::type_id_literal(def.id);
        parse_quote! {
            impl sdp_wire::Message for #name {
                const TYPE_ID: u16 = #type_id;
            }
        }
    }

    fn finish(self, ctx: &GeneratorContext, mut fragments: Vec<Item>) -> String {
        let structs = ctx.schema.structs();
        let variants = structs
            .iter()
            .map(|def| Self::type_ident(ctx, def.id))
            .collect::<Vec<_>>();
        let types = variants.clone();
        let ids = structs
            .iter()
            .map(|def| Self::type_id_literal(def.id))
            .collect::<Vec<_>>();

        fragments.push(parse_quote! {
            /// Any message of this schema, discriminated by the header type id.
            #[derive(Debug, Clone, PartialEq)]
            pub enum AnyMessage {
                #(#variants(#types)),*
            }
        });
        fragments.push(parse_quote! {
            impl AnyMessage {
                pub fn type_id(&self) -> u16 {
                    match self {
                        #(Self::#variants(_) => #ids,)*
                    }
                }

                pub fn encode_message(&self) -> ::std::vec::Vec<u8> {
                    match self {
                        #(Self::#variants(value) => sdp_wire::Message::encode_message(value),)*
                    }
                }

                pub fn decode_message(
                    data: &[u8],
                ) -> ::core::result::Result<Self, sdp_wire::DecodeError> {
                    Self::decode_message_with_limits(data, sdp_wire::DecodeLimits::default())
                }

                /// Validates the header and decodes the payload as the struct its type id names.
                pub fn decode_message_with_limits(
                    data: &[u8],
                    limits: sdp_wire::DecodeLimits,
                ) -> ::core::result::Result<Self, sdp_wire::DecodeError> {
                    limits.check_input_size(data.len())?;
                    let (header, payload) = sdp_wire::MessageHeader::parse(data)?;
                    match header.type_id {
                        #(#ids => sdp_wire::decode_payload(payload, limits).map(Self::#variants),)*
                        other => ::core::result::Result::Err(
                            sdp_wire::DecodeError::UnknownMessageType(other),
                        ),
                    }
                }
            }
        });

        let doc_comment = format!(" {GENERATED_BY}");
        let root = syn::File {
            shebang: None,
            attrs: vec![
                parse_quote!(#![doc = #doc_comment]),
                parse_quote!(#![allow(dead_code)]),
            ],
            items: fragments,
        };
        prettyplease::unparse(&root)
    }
}
