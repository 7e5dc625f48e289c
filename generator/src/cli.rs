use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sdp_wire::{DecodeLimits, MAX_ARRAY_ELEMENTS, MAX_SERIALIZED_SIZE, MAX_TOTAL_ELEMENTS};

use sdp_generator::Generator;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(short, long, global = true, help = "Log debug output to stderr")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate encoder and decoder source code for a schema
    Generate {
        #[clap(long, value_enum)]
        lang: Generator,

        #[clap(long, default_value = "sdp", help = "Package name of generated Go code")]
        package: String,

        #[clap(short, long, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,

        #[clap(value_parser, help = "The schema file or URL")]
        schema: String,
    },
    /// Validate a schema and report every error found
    Validate {
        #[clap(value_parser, help = "The schema file or URL")]
        schema: String,
    },
    /// Print the resolved schema as JSON
    Ast {
        #[clap(value_parser, help = "The schema file or URL")]
        schema: String,
    },
    /// Encode a JSON object into wire bytes
    Encode {
        #[clap(long = "type", value_name = "STRUCT", help = "Struct the JSON object describes")]
        type_name: String,

        #[clap(long, help = "Prefix the payload with a message header")]
        message: bool,

        #[clap(value_parser, help = "The schema file or URL")]
        schema: String,

        input: PathBuf,

        output: PathBuf,
    },
    /// Decode wire bytes and print them as JSON
    Decode {
        #[clap(
            long = "type",
            value_name = "STRUCT",
            required_unless_present = "message",
            conflicts_with = "message",
            help = "Struct to decode the bytes as"
        )]
        type_name: Option<String>,

        #[clap(long, help = "Read a message header and dispatch on its type id")]
        message: bool,

        #[clap(flatten)]
        limits: LimitArgs,

        #[clap(value_parser, help = "The schema file or URL")]
        schema: String,

        input: PathBuf,
    },
}

#[derive(Args, Clone, Debug)]
pub struct LimitArgs {
    #[clap(long, default_value_t = MAX_SERIALIZED_SIZE, help = "Largest accepted input in bytes")]
    pub max_message_size: usize,

    #[clap(long, default_value_t = MAX_ARRAY_ELEMENTS, help = "Largest accepted array count")]
    pub max_array_elements: u32,

    #[clap(
        long,
        default_value_t = MAX_TOTAL_ELEMENTS,
        help = "Largest accepted element count across all arrays"
    )]
    pub max_total_elements: u64,
}

impl From<LimitArgs> for DecodeLimits {
    fn from(args: LimitArgs) -> Self {
        Self {
            max_message_size: args.max_message_size,
            max_array_elements: args.max_array_elements,
            max_total_elements: args.max_total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decode_defaults_to_protocol_limits() {
        let cli = Cli::parse_from(["sdp-gen", "decode", "--message", "a.sdp", "a.bin"]);
        let Command::Decode { limits, .. } = cli.command else {
            panic!("expected decode command");
        };
        assert_eq!(DecodeLimits::from(limits), DecodeLimits::default());
    }

    #[test]
    fn decode_needs_type_or_message() {
        assert!(Cli::try_parse_from(["sdp-gen", "decode", "a.sdp", "a.bin"]).is_err());
        assert!(Cli::try_parse_from([
            "sdp-gen", "decode", "--type", "A", "--message", "a.sdp", "a.bin"
        ])
        .is_err());
    }
}
