mod common;

#[cfg(feature = "generator-go")]
mod go;
#[cfg(feature = "generator-rust")]
mod rust;

#[cfg(not(any(feature = "generator-rust", feature = "generator-go")))]
compile_error!("At least one generator must be enabled");

use clap::ValueEnum;
use sdp_schema::Schema;

use common::GeneratorContext;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Generator {
    #[cfg(feature = "generator-rust")]
    Rust,
    #[cfg(feature = "generator-go")]
    Go,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Go package name. Rust output is a plain module and ignores it.
    pub package: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: "sdp".into(),
        }
    }
}

impl Generator {
    pub fn generate(&self, schema: &Schema, options: &GeneratorOptions) -> String {
        let ctx = GeneratorContext::new(schema, options);
        tracing::info!(
            generator = ?self,
            structs = schema.structs().len(),
            "generating code"
        );
        match *self {
            #[cfg(feature = "generator-rust")]
            Self::Rust => common::generate_with(rust::RustBackend::new(), &ctx),
            #[cfg(feature = "generator-go")]
            Self::Go => common::generate_with(go::GoBackend::new(), &ctx),
        }
    }
}
