mod cli;
mod error;
mod json;
mod source;

use std::{error::Error as _, fs, process::ExitCode};

use clap::Parser;
use sdp_generator::GeneratorOptions;
use sdp_schema::{codec, message, Schema};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use error::GeneratorError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), GeneratorError> {
    match command {
        Command::Generate {
            lang,
            package,
            output,
            schema,
        } => {
            let schema = source::load(&schema)?;
            let code = lang.generate(&schema, &GeneratorOptions { package });
            match output {
                Some(path) => {
                    fs::write(&path, code)
                        .map_err(|source| GeneratorError::Write { path, source })?;
                }
                None => print!("{code}"),
            }
        }
        Command::Validate { schema } => {
            let schema = source::load(&schema)?;
            println!("schema is valid: {} structs", schema.structs().len());
        }
        Command::Ast { schema } => {
            let schema = source::load(&schema)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Encode {
            type_name,
            message: framed,
            schema,
            input,
            output,
        } => {
            let schema = source::load(&schema)?;
            let decl = find_struct(&schema, &type_name)?;
            let text = fs::read_to_string(&input).map_err(|source| GeneratorError::Read {
                path: input.clone(),
                source,
            })?;
            let document: serde_json::Value = serde_json::from_str(&text)?;
            let value = json::struct_from_json(&schema, decl.id, &document, &decl.name)?;
            let bytes = if framed {
                message::frame(&schema, &value)?
            } else {
                codec::encode(&schema, &value)?
            };
            fs::write(&output, &bytes).map_err(|source| GeneratorError::Write {
                path: output.clone(),
                source,
            })?;
            tracing::info!(path = %output.display(), bytes = bytes.len(), "wrote encoded data");
        }
        Command::Decode {
            type_name,
            message: framed,
            limits,
            schema,
            input,
        } => {
            let schema = source::load(&schema)?;
            let data = fs::read(&input).map_err(|source| GeneratorError::Read {
                path: input.clone(),
                source,
            })?;
            let limits = limits.into();
            let document = match type_name {
                Some(type_name) if !framed => {
                    let decl = find_struct(&schema, &type_name)?;
                    let (value, consumed) = codec::decode(&schema, decl.id, &data, limits)?;
                    if consumed < data.len() {
                        tracing::warn!(
                            consumed,
                            total = data.len(),
                            "ignoring trailing bytes after payload"
                        );
                    }
                    json::struct_to_json(&schema, &value)
                }
                _ => {
                    let value = message::dispatch(&schema, &data, limits)?;
                    json!({
                        "type": schema.get(value.id).name,
                        "value": json::struct_to_json(&schema, &value),
                    })
                }
            };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

fn find_struct<'a>(
    schema: &'a Schema,
    name: &str,
) -> Result<&'a sdp_schema::Struct, GeneratorError> {
    schema
        .by_name(name)
        .ok_or_else(|| GeneratorError::UnknownStruct(name.to_owned()))
}
