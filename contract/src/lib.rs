//! Codecs generated by `sdp-gen` from the schemas under `schemas/`, compiled against `sdp-wire`.
//!
//! Each schema becomes a module of the same name. The Go rendition of every schema is exposed
//! as source text so tests can hand it to a Go toolchain when one is installed.

include!(concat!(env!("OUT_DIR"), "/generated.rs"));

pub const SHAPES_SCHEMA: &str = include_str!("../schemas/shapes.sdp");
pub const COLLISIONS_SCHEMA: &str = include_str!("../schemas/collisions.sdp");

/// Go code for `shapes.sdp` in package `main`.
pub const SHAPES_GO: &str = include_str!(concat!(env!("OUT_DIR"), "/shapes.go"));
/// Go code for `collisions.sdp` in package `main`.
pub const COLLISIONS_GO: &str = include_str!(concat!(env!("OUT_DIR"), "/collisions.go"));
