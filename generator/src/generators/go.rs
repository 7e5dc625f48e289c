use sdp_schema::{Primitive, Struct, StructId, TypeExpr, TypeKind};
use sdp_wire::{MAX_ARRAY_ELEMENTS, MAX_SERIALIZED_SIZE, MAX_TOTAL_ELEMENTS};

use super::common::{Backend, GeneratorContext, GENERATED_BY};

use heck::ToPascalCase;

/// Emits a single self-contained Go file: no imports beyond the standard library.
pub(super) struct GoBackend;

impl GoBackend {
    pub(super) fn new() -> Self {
        Self
    }
}

/// Tab-indented Go source with numbered temporaries.
///
/// Temporaries are numbered per function so sibling fields never redeclare a name in the same
/// scope.
struct Code<'c> {
    ctx: &'c GeneratorContext<'c>,
    buf: String,
    indent: usize,
    temps: usize,
}

impl<'c> Code<'c> {
    fn new(ctx: &'c GeneratorContext<'c>) -> Self {
        Self {
            ctx,
            buf: String::new(),
            indent: 0,
            temps: 0,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf.extend(std::iter::repeat('\t').take(self.indent));
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    fn close(&mut self, text: impl AsRef<str>) {
        self.indent -= 1;
        self.line(text);
    }

    fn comment(&mut self, text: &str) {
        for line in text.lines() {
            self.line(format!("// {line}").trim_end());
        }
    }

    fn begin_function(&mut self, signature: impl AsRef<str>) {
        self.temps = 0;
        self.open(format!("{} {{", signature.as_ref()));
    }

    fn temp(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}{}", self.temps);
        self.temps += 1;
        name
    }

    fn struct_name(&self, id: StructId) -> String {
        struct_name(self.ctx, id)
    }

    fn go_type(&self, ty: &TypeExpr) -> String {
        let inner = match &ty.kind {
            TypeKind::Primitive(primitive) => primitive_type(*primitive).to_owned(),
            TypeKind::Named(id) => self.struct_name(*id),
            TypeKind::Array(element) => format!("[]{}", self.go_type(element)),
        };
        if ty.optional {
            format!("*{inner}")
        } else {
            inner
        }
    }

    fn size(&mut self, ty: &TypeExpr, target: &str) {
        if ty.optional {
            self.line("size += 1");
            self.open(format!("if {target} != nil {{"));
            self.size(&ty.required(), &format!("(*{target})"));
            self.close("}");
            return;
        }
        match &ty.kind {
            TypeKind::Primitive(Primitive::Str) => self.line(format!("size += 4 + len({target})")),
            TypeKind::Primitive(primitive) => {
                let width = primitive.fixed_width().unwrap_or_default();
                self.line(format!("size += {width}"));
            }
            TypeKind::Named(id) => {
                let name = self.struct_name(*id);
                self.line(format!("size += calculate{name}Size(&{target})"));
            }
            TypeKind::Array(element) => match element.fixed_width() {
                Some(width) => self.line(format!("size += 4 + len({target})*{width}")),
                None => {
                    let item = self.temp("e");
                    self.line("size += 4");
                    self.open(format!("for _, {item} := range {target} {{"));
                    self.size(element, &item);
                    self.close("}");
                }
            },
        }
    }

    fn encode(&mut self, ty: &TypeExpr, target: &str) {
        if ty.optional {
            self.open(format!("if {target} != nil {{"));
            self.line("e.presence(true)");
            self.encode(&ty.required(), &format!("(*{target})"));
            self.close("} else {");
            self.indent += 1;
            self.line("e.presence(false)");
            self.close("}");
            return;
        }
        match &ty.kind {
            TypeKind::Primitive(primitive) => {
                self.line(format!("e.{}({target})", primitive_method(*primitive)))
            }
            TypeKind::Named(id) => {
                let name = self.struct_name(*id);
                self.line(format!("encode{name}(e, &{target})"));
            }
            TypeKind::Array(element) => {
                let item = self.temp("e");
                self.line(format!("e.length(len({target}))"));
                self.open(format!("for _, {item} := range {target} {{"));
                self.encode(element, &item);
                self.close("}");
            }
        }
    }

    fn decode(&mut self, ty: &TypeExpr, target: &str) {
        if ty.optional {
            let present = self.temp("p");
            let inner = ty.required();
            self.line(format!("var {present} bool"));
            self.check(format!("{present}, err = d.presence()"));
            self.open(format!("if {present} {{"));
            self.line(format!("{target} = new({})", self.go_type(&inner)));
            self.decode(&inner, &format!("(*{target})"));
            self.close("}");
            return;
        }
        match &ty.kind {
            TypeKind::Primitive(primitive) => {
                self.check(format!("{target}, err = d.{}()", primitive_method(*primitive)))
            }
            TypeKind::Named(id) => {
                let name = self.struct_name(*id);
                self.check(format!("err = decode{name}(d, &{target})"));
            }
            TypeKind::Array(element) => {
                let count = self.temp("n");
                let capacity = self.temp("c");
                let index = self.temp("i");
                let item = self.temp("e");
                let element_type = self.go_type(element);
                self.line(format!("var {count}, {capacity} int"));
                self.check(format!("{count}, {capacity}, err = d.arrayLen()"));
                self.line(format!("{target} = make([]{element_type}, 0, {capacity})"));
                self.open(format!("for {index} := 0; {index} < {count}; {index}++ {{"));
                self.line(format!("var {item} {element_type}"));
                self.decode(element, &item);
                self.line(format!("{target} = append({target}, {item})"));
                self.close("}");
            }
        }
    }

    fn check(&mut self, statement: impl AsRef<str>) {
        self.open(format!("if {}; err != nil {{", statement.as_ref()));
        self.line("return err");
        self.close("}");
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn struct_name(ctx: &GeneratorContext, id: StructId) -> String {
    ctx.struct_name(id).to_pascal_case()
}

fn field_name(name: &str) -> String {
    name.to_pascal_case()
}

fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::U8 => "uint8",
        Primitive::U16 => "uint16",
        Primitive::U32 => "uint32",
        Primitive::U64 => "uint64",
        Primitive::I8 => "int8",
        Primitive::I16 => "int16",
        Primitive::I32 => "int32",
        Primitive::I64 => "int64",
        Primitive::F32 => "float32",
        Primitive::F64 => "float64",
        Primitive::Bool => "bool",
        Primitive::Str => "string",
    }
}

/// Name of the encoder/decoder helper method for a primitive.
fn primitive_method(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Bool => "boolean",
        Primitive::Str => "str",
        other => other.name(),
    }
}

impl Backend for GoBackend {
    type Fragment = String;

    fn render_prelude(&mut self, ctx: &GeneratorContext) -> Vec<String> {
        let header = format!(
            "// Code generated by {generated_by}. DO NOT EDIT.\n\npackage {package}\n",
            generated_by = GENERATED_BY.trim_start_matches("Generated by "),
            package = ctx.options.package,
        );
        let limits = format!(
            "const (\n\
             \tMaxSerializedSize = {MAX_SERIALIZED_SIZE}\n\
             \tMaxArrayElements  = {MAX_ARRAY_ELEMENTS}\n\
             \tMaxTotalElements  = {MAX_TOTAL_ELEMENTS}\n\
             )\n"
        );
        vec![header, RUNTIME_IMPORTS.into(), limits, RUNTIME.into()]
    }

    fn render_struct(&mut self, ctx: &GeneratorContext, def: &Struct) -> String {
        let mut code = Code::new(ctx);
        let name = struct_name(ctx, def.id);
        if let Some(comment) = &def.comment {
            code.comment(comment);
        }
        code.open(format!("type {name} struct {{"));
        let names = def
            .fields
            .iter()
            .map(|field| field_name(&field.name))
            .collect::<Vec<_>>();
        let width = names.iter().map(String::len).max().unwrap_or(0);
        for (field, go_name) in def.fields.iter().zip(&names) {
            if let Some(comment) = &field.comment {
                code.comment(comment);
            }
            let ty = code.go_type(&field.ty);
            code.line(format!("{go_name:width$} {ty}"));
        }
        code.close("}");
        code.finish()
    }

    fn render_encode(&mut self, ctx: &GeneratorContext, def: &Struct) -> String {
        let mut code = Code::new(ctx);
        let name = struct_name(ctx, def.id);

        code.line(format!(
            "// calculate{name}Size returns the exact byte-mode size of v."
        ));
        code.begin_function(format!("func calculate{name}Size(v *{name}) int"));
        code.line("size := 0");
        for field in &def.fields {
            code.size(&field.ty, &format!("v.{}", field_name(&field.name)));
        }
        code.line("return size");
        code.close("}");
        code.line("");

        code.line(format!(
            "// Encode{name} encodes v in byte mode into an exactly sized buffer."
        ));
        code.begin_function(format!("func Encode{name}(v *{name}) []byte"));
        code.line(format!("buf := make([]byte, calculate{name}Size(v))"));
        code.line("e := encoder{buf: buf}");
        code.line(format!("encode{name}(&e, v)"));
        code.line("return buf");
        code.close("}");
        code.line("");

        code.begin_function(format!("func encode{name}(e *encoder, v *{name})"));
        for field in &def.fields {
            code.encode(&field.ty, &format!("v.{}", field_name(&field.name)));
        }
        code.close("}");
        code.finish()
    }

    fn render_decode(&mut self, ctx: &GeneratorContext, def: &Struct) -> String {
        let mut code = Code::new(ctx);
        let name = struct_name(ctx, def.id);

        code.line(format!(
            "// Decode{name} decodes a {name} from the front of data. Trailing bytes are ignored."
        ));
        code.begin_function(format!("func Decode{name}(data []byte) (*{name}, error)"));
        code.open("if len(data) > MaxSerializedSize {");
        code.line("return nil, ErrDataTooLarge");
        code.close("}");
        code.line("d := decoder{data: data}");
        code.line(format!("v := &{name}{{}}"));
        code.open(format!("if err := decode{name}(&d, v); err != nil {{"));
        code.line("return nil, err");
        code.close("}");
        code.line("return v, nil");
        code.close("}");
        code.line("");

        code.begin_function(format!("func decode{name}(d *decoder, v *{name}) error"));
        code.line("var err error");
        for field in &def.fields {
            code.decode(&field.ty, &format!("v.{}", field_name(&field.name)));
        }
        code.line("return nil");
        code.close("}");
        code.finish()
    }

    fn render_framing(&mut self, ctx: &GeneratorContext, def: &Struct) -> String {
        let mut code = Code::new(ctx);
        let name = struct_name(ctx, def.id);
        let type_id = def.id.type_id();

        code.line(format!("const {name}TypeID uint16 = {type_id}"));
        code.line("");
        code.line(format!(
            "// Encode{name}Message encodes v behind a message header."
        ));
        code.begin_function(format!("func Encode{name}Message(v *{name}) []byte"));
        code.open(format!(
            "return frameMessage({name}TypeID, calculate{name}Size(v), func(e *encoder) {{"
        ));
        code.line(format!("encode{name}(e, v)"));
        code.close("})");
        code.close("}");
        code.line("");

        code.line(format!(
            "// Decode{name}Message validates the message header and decodes its {name} payload."
        ));
        code.begin_function(format!(
            "func Decode{name}Message(data []byte) (*{name}, error)"
        ));
        code.line("typeID, payload, err := parseHeader(data)");
        code.open("if err != nil {");
        code.line("return nil, err");
        code.close("}");
        code.open(format!("if typeID != {name}TypeID {{"));
        code.line("return nil, ErrUnknownMessageType");
        code.close("}");
        code.line("d := decoder{data: payload}");
        code.line(format!("v := &{name}{{}}"));
        code.open(format!("if err := decode{name}(&d, v); err != nil {{"));
        code.line("return nil, err");
        code.close("}");
        code.line("return v, nil");
        code.close("}");
        code.finish()
    }

    fn finish(self, ctx: &GeneratorContext, mut fragments: Vec<String>) -> String {
        let mut code = Code::new(ctx);
        code.line("// DecodeMessage decodes any message of this schema and returns a pointer to the");
        code.line("// struct named by the header type id.");
        code.begin_function("func DecodeMessage(data []byte) (any, error)");
        code.line("typeID, payload, err := parseHeader(data)");
        code.open("if err != nil {");
        code.line("return nil, err");
        code.close("}");
        code.line("d := decoder{data: payload}");
        code.line("switch typeID {");
        for def in ctx.schema.structs() {
            let name = struct_name(ctx, def.id);
            code.open(format!("case {name}TypeID:"));
            code.line(format!("v := &{name}{{}}"));
            code.open(format!("if err := decode{name}(&d, v); err != nil {{"));
            code.line("return nil, err");
            code.close("}");
            code.line("return v, nil");
            code.indent -= 1;
        }
        code.open("default:");
        code.line("return nil, ErrUnknownMessageType");
        code.close("}");
        code.close("}");
        fragments.push(code.finish());
        fragments.join("\n")
    }
}

const RUNTIME_IMPORTS: &str = "import (
\t\"encoding/binary\"
\t\"errors\"
\t\"math\"
\t\"unicode/utf8\"
)
";

const RUNTIME: &str = r#"const (
	MessageMagic           = "SDP"
	MessageVersion    byte = '2'
	MessageHeaderSize      = 10
)

var (
	ErrUnexpectedEOF       = errors.New("unexpected end of data")
	ErrInvalidMagic        = errors.New("invalid magic bytes (expected 'SDP')")
	ErrInvalidVersion      = errors.New("unsupported protocol version")
	ErrUnknownMessageType  = errors.New("unknown message type id")
	ErrInvalidUTF8         = errors.New("invalid UTF-8 string")
	ErrInvalidBoolValue    = errors.New("invalid boolean value")
	ErrInvalidPresenceFlag = errors.New("invalid presence flag")
	ErrArrayTooLarge       = errors.New("array count exceeds per-array limit")
	ErrTooManyElements     = errors.New("total elements exceed limit")
	ErrDataTooLarge        = errors.New("data exceeds size limit")
)

// DecodeContext tracks array elements across one decode call.
type DecodeContext struct {
	totalElements uint64
}

func (ctx *DecodeContext) checkArraySize(count uint32) error {
	if count > MaxArrayElements {
		return ErrArrayTooLarge
	}
	ctx.totalElements += uint64(count)
	if ctx.totalElements > MaxTotalElements {
		return ErrTooManyElements
	}
	return nil
}

type encoder struct {
	buf    []byte
	offset int
}

func (e *encoder) u8(v uint8) {
	e.buf[e.offset] = v
	e.offset++
}

func (e *encoder) u16(v uint16) {
	binary.LittleEndian.PutUint16(e.buf[e.offset:], v)
	e.offset += 2
}

func (e *encoder) u32(v uint32) {
	binary.LittleEndian.PutUint32(e.buf[e.offset:], v)
	e.offset += 4
}

func (e *encoder) u64(v uint64) {
	binary.LittleEndian.PutUint64(e.buf[e.offset:], v)
	e.offset += 8
}

func (e *encoder) i8(v int8) { e.u8(uint8(v)) }
func (e *encoder) i16(v int16) { e.u16(uint16(v)) }
func (e *encoder) i32(v int32) { e.u32(uint32(v)) }
func (e *encoder) i64(v int64) { e.u64(uint64(v)) }
func (e *encoder) f32(v float32) { e.u32(math.Float32bits(v)) }
func (e *encoder) f64(v float64) { e.u64(math.Float64bits(v)) }
func (e *encoder) length(n int) { e.u32(uint32(n)) }

func (e *encoder) boolean(v bool) {
	if v {
		e.u8(1)
	} else {
		e.u8(0)
	}
}

func (e *encoder) presence(present bool) { e.boolean(present) }

func (e *encoder) str(v string) {
	e.length(len(v))
	e.offset += copy(e.buf[e.offset:], v)
}

type decoder struct {
	data   []byte
	offset int
	ctx    DecodeContext
}

func (d *decoder) take(n int) ([]byte, error) {
	if n > len(d.data)-d.offset {
		return nil, ErrUnexpectedEOF
	}
	b := d.data[d.offset : d.offset+n]
	d.offset += n
	return b, nil
}

func (d *decoder) u8() (uint8, error) {
	b, err := d.take(1)
	if err != nil {
		return 0, err
	}
	return b[0], nil
}

func (d *decoder) u16() (uint16, error) {
	b, err := d.take(2)
	if err != nil {
		return 0, err
	}
	return binary.LittleEndian.Uint16(b), nil
}

func (d *decoder) u32() (uint32, error) {
	b, err := d.take(4)
	if err != nil {
		return 0, err
	}
	return binary.LittleEndian.Uint32(b), nil
}

func (d *decoder) u64() (uint64, error) {
	b, err := d.take(8)
	if err != nil {
		return 0, err
	}
	return binary.LittleEndian.Uint64(b), nil
}

func (d *decoder) i8() (int8, error) {
	v, err := d.u8()
	return int8(v), err
}

func (d *decoder) i16() (int16, error) {
	v, err := d.u16()
	return int16(v), err
}

func (d *decoder) i32() (int32, error) {
	v, err := d.u32()
	return int32(v), err
}

func (d *decoder) i64() (int64, error) {
	v, err := d.u64()
	return int64(v), err
}

func (d *decoder) f32() (float32, error) {
	v, err := d.u32()
	return math.Float32frombits(v), err
}

func (d *decoder) f64() (float64, error) {
	v, err := d.u64()
	return math.Float64frombits(v), err
}

func (d *decoder) flag(invalid error) (bool, error) {
	v, err := d.u8()
	if err != nil {
		return false, err
	}
	switch v {
	case 0:
		return false, nil
	case 1:
		return true, nil
	}
	return false, invalid
}

func (d *decoder) boolean() (bool, error) { return d.flag(ErrInvalidBoolValue) }
func (d *decoder) presence() (bool, error) { return d.flag(ErrInvalidPresenceFlag) }

func (d *decoder) str() (string, error) {
	n, err := d.u32()
	if err != nil {
		return "", err
	}
	b, err := d.take(int(n))
	if err != nil {
		return "", err
	}
	if !utf8.Valid(b) {
		return "", ErrInvalidUTF8
	}
	return string(b), nil
}

// arrayLen reads an array count, checks it against the limits and returns it with a capacity
// bounded by the remaining input.
func (d *decoder) arrayLen() (int, int, error) {
	n, err := d.u32()
	if err != nil {
		return 0, 0, err
	}
	if err := d.ctx.checkArraySize(n); err != nil {
		return 0, 0, err
	}
	capacity := int(n)
	if remaining := len(d.data) - d.offset; capacity > remaining {
		capacity = remaining
	}
	return int(n), capacity, nil
}

func parseHeader(data []byte) (uint16, []byte, error) {
	if len(data) > MaxSerializedSize {
		return 0, nil, ErrDataTooLarge
	}
	if len(data) < MessageHeaderSize {
		return 0, nil, ErrUnexpectedEOF
	}
	if string(data[0:3]) != MessageMagic {
		return 0, nil, ErrInvalidMagic
	}
	if data[3] != MessageVersion {
		return 0, nil, ErrInvalidVersion
	}
	typeID := binary.LittleEndian.Uint16(data[4:6])
	payloadLen := binary.LittleEndian.Uint32(data[6:10])
	if uint64(len(data)-MessageHeaderSize) < uint64(payloadLen) {
		return 0, nil, ErrUnexpectedEOF
	}
	return typeID, data[MessageHeaderSize : MessageHeaderSize+int(payloadLen)], nil
}

func frameMessage(typeID uint16, size int, encode func(e *encoder)) []byte {
	buf := make([]byte, MessageHeaderSize+size)
	copy(buf, MessageMagic)
	buf[3] = MessageVersion
	binary.LittleEndian.PutUint16(buf[4:6], typeID)
	binary.LittleEndian.PutUint32(buf[6:10], uint32(size))
	e := encoder{buf: buf, offset: MessageHeaderSize}
	encode(&e)
	return buf
}
"#;

#[cfg(test)]
mod tests {
    use sdp_schema::parse_schema;

    use crate::generators::{Generator, GeneratorOptions};

    fn generate(source: &str) -> String {
        let schema = parse_schema(source).unwrap();
        let options = GeneratorOptions {
            package: "shapes".into(),
        };
        Generator::Go.generate(&schema, &options)
    }

    const SHAPES: &str = "/// A point\n\
                          struct Point { x: f64, y: f64 }\n\
                          struct Shape {\n\
                              label: str,\n\
                              points: []Point,\n\
                              anchor: Option<Point>,\n\
                              tags: Option<[]str>,\n\
                              grid: [][]i16,\n\
                          }";

    #[test]
    fn header_and_runtime() {
        let output = generate(SHAPES);
        assert!(output.starts_with("// Code generated by sdp-generator "));
        assert!(output.contains("DO NOT EDIT.\n\npackage shapes\n"));
        assert!(output.contains("\tMaxArrayElements  = 1000000\n"));
        assert!(output.contains("\tMaxSerializedSize = 134217728\n"));
        assert!(output.contains("MessageVersion    byte = '2'"));
        assert!(output.contains("ErrInvalidPresenceFlag = errors.New("));
        for name in sdp_schema::reserved::GO_RUNTIME_NAMES {
            assert!(output.contains(name), "{name} missing from the runtime prelude");
        }
    }

    #[test]
    fn structs_and_fields() {
        let output = generate(SHAPES);
        assert!(output.contains("// A point\ntype Point struct {\n\tX float64\n\tY float64\n}\n"));
        assert!(output.contains("\tLabel  string\n"));
        assert!(output.contains("\tPoints []Point\n"));
        assert!(output.contains("\tAnchor *Point\n"));
        assert!(output.contains("\tTags   *[]string\n"));
        assert!(output.contains("\tGrid   [][]int16\n"));
    }

    #[test]
    fn size_and_encode() {
        let output = generate(SHAPES);
        assert!(output.contains("func calculatePointSize(v *Point) int {\n\tsize := 0\n\tsize += 8\n\tsize += 8\n\treturn size\n}"));
        assert!(output.contains(
            "\tsize += 4\n\tfor _, e0 := range v.Points {\n\t\tsize += calculatePointSize(&e0)\n\t}\n"
        ));
        assert!(output.contains("\tsize += 1\n\tif v.Anchor != nil {\n\t\tsize += calculatePointSize(&(*v.Anchor))\n\t}\n"));
        assert!(output.contains("\t\tfor _, e1 := range (*v.Tags) {\n\t\t\tsize += 4 + len(e1)\n"));
        assert!(output.contains("\tfor _, e2 := range v.Grid {\n\t\tsize += 4 + len(e2)*2\n"));
        assert!(output.contains(
            "\tif v.Anchor != nil {\n\t\te.presence(true)\n\t\tencodePoint(e, &(*v.Anchor))\n\t} else {\n\t\te.presence(false)\n\t}\n"
        ));
    }

    #[test]
    fn decode_checks_every_read() {
        let output = generate(SHAPES);
        assert!(output.contains("\tif v.X, err = d.f64(); err != nil {\n\t\treturn err\n\t}\n"));
        assert!(output.contains(
            "\tvar n0, c1 int\n\
             \tif n0, c1, err = d.arrayLen(); err != nil {\n\t\treturn err\n\t}\n\
             \tv.Points = make([]Point, 0, c1)\n\
             \tfor i2 := 0; i2 < n0; i2++ {\n\
             \t\tvar e3 Point\n\
             \t\tif err = decodePoint(d, &e3); err != nil {\n\t\t\treturn err\n\t\t}\n\
             \t\tv.Points = append(v.Points, e3)\n\
             \t}\n"
        ));
        assert!(output.contains(
            "\tvar p4 bool\n\
             \tif p4, err = d.presence(); err != nil {\n\t\treturn err\n\t}\n\
             \tif p4 {\n\
             \t\tv.Anchor = new(Point)\n"
        ));
    }

    #[test]
    fn framing_and_dispatch() {
        let output = generate(SHAPES);
        assert!(output.contains("const ShapeTypeID uint16 = 2\n"));
        assert!(output.contains("func EncodeShapeMessage(v *Shape) []byte {"));
        assert!(output.contains("func DecodeShapeMessage(data []byte) (*Shape, error) {"));
        assert!(output.contains("\tif typeID != ShapeTypeID {\n\t\treturn nil, ErrUnknownMessageType\n\t}\n"));
        assert!(output.contains("func DecodeMessage(data []byte) (any, error) {"));
        assert!(output.contains("\tcase PointTypeID:\n\t\tv := &Point{}\n"));
        assert!(output.contains("\tdefault:\n\t\treturn nil, ErrUnknownMessageType\n\t}\n}\n"));
    }
}
