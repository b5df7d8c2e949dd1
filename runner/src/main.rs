use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

mod build;
mod config;
mod decode;
mod encode;
mod logger;
mod path;
mod vectors;

use logger::RunnerLogger;

// —————————————————————————————— CLI Parsing ——————————————————————————————— //

#[derive(Parser)]
struct CliArgs {
    #[arg(short, long, action, global = true)]
    /// Print debug information
    verbose: bool,
    #[command(subcommand)]
    command: Subcommands,
}

#[derive(Subcommand)]
enum Subcommands {
    /// Build a firmware image for the configured platform
    Build(BuildArgs),
    /// Print the self-test vectors and the reference results
    Vectors,
    /// Interpret the values of the result and done registers
    Decode(DecodeArgs),
    /// Print the encoding of a BN.SUM4 instruction
    Encode(EncodeArgs),
}

#[derive(Args)]
struct BuildArgs {
    #[arg(short, long, default_value = "bn_sum4")]
    firmware: String,
    #[arg(long)]
    /// Path to the configuration file to use
    config: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(value_parser = decode::parse_u32)]
    /// Value of the result register
    result: u32,
    #[arg(value_parser = decode::parse_u32)]
    /// Value of the done register
    done: u32,
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long, default_value = "a0")]
    /// Destination register
    rd: String,
    #[arg(long, default_value = "a0")]
    /// Register holding the packed activations
    rs1: String,
    #[arg(long, default_value = "a1")]
    /// Register holding the packed weights
    rs2: String,
}

// —————————————————————————————— Entry Point ——————————————————————————————— //

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = RunnerLogger::init(level) {
        eprintln!("Failed to set logger: {}", err);
        return ExitCode::FAILURE;
    }

    match args.command {
        Subcommands::Build(args) => build::build(&args),
        Subcommands::Vectors => vectors::print_vectors(),
        Subcommands::Decode(args) => decode::decode(&args),
        Subcommands::Encode(args) => encode::encode(&args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parse_decode() {
        let args =
            CliArgs::try_parse_from(["runner", "decode", "0xBAD00002", "0xcafef00d"]).unwrap();
        match args.command {
            Subcommands::Decode(args) => {
                assert_eq!(args.result, 0xBAD0_0002);
                assert_eq!(args.done, 0xCAFE_F00D);
            }
            _ => panic!("Expected the decode subcommand"),
        }
    }

    #[test]
    fn parse_encode_defaults() {
        let args = CliArgs::try_parse_from(["runner", "-v", "encode", "--rd", "t0"]).unwrap();
        assert!(args.verbose);
        match args.command {
            Subcommands::Encode(args) => {
                assert_eq!(args.rd, "t0");
                assert_eq!(args.rs1, "a0");
                assert_eq!(args.rs2, "a1");
            }
            _ => panic!("Expected the encode subcommand"),
        }
    }
}
