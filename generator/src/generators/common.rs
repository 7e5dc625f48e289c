use sdp_schema::{Schema, Struct, StructId};

use super::GeneratorOptions;

/// One target language. The driver calls the `render_*` methods for every struct in
/// declaration order and hands all fragments to [`Backend::finish`].
pub(super) trait Backend: Sized {
    type Fragment;

    fn render_prelude(&mut self, ctx: &GeneratorContext) -> Vec<Self::Fragment>;

    /// The type definition.
    fn render_struct(&mut self, ctx: &GeneratorContext, def: &Struct) -> Self::Fragment;

    /// Size calculation and byte-mode encoding.
    fn render_encode(&mut self, ctx: &GeneratorContext, def: &Struct) -> Self::Fragment;

    /// Byte-mode decoding with limit checks.
    fn render_decode(&mut self, ctx: &GeneratorContext, def: &Struct) -> Self::Fragment;

    /// Message-mode encoding and decoding for one struct.
    fn render_framing(&mut self, ctx: &GeneratorContext, def: &Struct) -> Self::Fragment;

    /// Adds schema-wide items such as the message dispatcher and renders the output file.
    fn finish(self, ctx: &GeneratorContext, fragments: Vec<Self::Fragment>) -> String;
}

pub(super) struct GeneratorContext<'a> {
    pub(super) schema: &'a Schema,
    pub(super) options: &'a GeneratorOptions,
}

impl<'a> GeneratorContext<'a> {
    pub(super) fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    pub(super) fn struct_name(&self, id: StructId) -> &'a str {
        &self.schema.get(id).name
    }
}

pub(super) fn generate_with<B: Backend>(mut backend: B, ctx: &GeneratorContext) -> String {
    let mut fragments = backend.render_prelude(ctx);
    for def in ctx.schema.structs() {
        tracing::debug!(name = %def.name, type_id = def.id.type_id(), "rendering struct");
        fragments.push(backend.render_struct(ctx, def));
        fragments.push(backend.render_encode(ctx, def));
        fragments.push(backend.render_decode(ctx, def));
        fragments.push(backend.render_framing(ctx, def));
    }
    backend.finish(ctx, fragments)
}

/// Banner placed at the top of every generated file.
pub(super) const GENERATED_BY: &str = concat!(
    "Generated by ",
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION")
);
