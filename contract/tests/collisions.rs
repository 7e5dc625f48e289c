//! Schema names that shadow runtime items still produce working code.

use sdp_contract::{collisions, COLLISIONS_SCHEMA};
use sdp_schema::{codec, message, parse_schema};
use sdp_wire::{Decode as _, DecodeLimits, Encode as _, Message as _};

fn reader(n: u8) -> collisions::Reader {
    collisions::Reader {
        reader: n,
        writer: 2,
        ctx: 3,
        limits: 4,
        r#type: "kind".into(),
        r#loop: true,
    }
}

fn sample() -> collisions::ResultSet {
    let writer = collisions::Writer {
        payload: vec![reader(1), reader(2)],
        header: Some(reader(3)),
        data: vec![vec![], vec![9, 8]],
    };
    let encode = collisions::Encode {
        value: -5,
        other: Some("x".into()),
        ok: true,
        err: false,
    };
    collisions::ResultSet {
        results: vec![
            encode.clone(),
            collisions::Encode {
                other: None,
                ..encode
            },
        ],
        buf: vec![collisions::Debug {
            u32: u32::MAX,
            size: 0,
        }],
    }
}

#[test]
fn shadowing_names_round_trip() {
    let value = sample();
    let bytes = value.encode();
    assert_eq!(collisions::ResultSet::decode(&bytes).unwrap(), value);

    let decode = collisions::Decode {
        encode: value.results[0].clone(),
        decode: Some(collisions::Writer {
            payload: vec![],
            header: None,
            data: vec![],
        }),
    };
    let framed = decode.encode_message();
    assert_eq!(
        collisions::AnyMessage::decode_message(&framed).unwrap(),
        collisions::AnyMessage::Decode(decode)
    );
}

#[test]
fn shadowing_names_match_dynamic_engine() {
    let schema = parse_schema(COLLISIONS_SCHEMA).unwrap();
    let value = sample();
    let framed = value.encode_message();

    let decoded = message::dispatch(&schema, &framed, DecodeLimits::default()).unwrap();
    assert_eq!(schema.get(decoded.id).name, "result_set");
    assert_eq!(codec::encode(&schema, &decoded).unwrap(), value.encode());
    assert_eq!(message::frame(&schema, &decoded).unwrap(), framed);
}
