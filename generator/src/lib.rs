//! Code generation for Serial Data Protocol schemas.
//!
//! Each target language is a backend behind its own cargo feature. The `sdp-gen` binary drives
//! them from the command line; build scripts can call [`Generator::generate`] directly.

pub mod generators;

pub use generators::{Generator, GeneratorOptions};
