//! Tilepack CLI - Decode base64 asset manifests into PNG files

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{decode, list, locate, verify, LocationArgs, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilepack")]
#[command(about = "Decode base64 asset manifests into PNG files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `decode` with no flags
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every manifest entry into the output tree
    Decode {
        #[command(flatten)]
        location: LocationArgs,

        /// Decode all entries before writing any file
        #[arg(long)]
        validate_first: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the files a decode would write, without writing them
    List {
        #[command(flatten)]
        location: LocationArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the manifest path that would be used
    Locate {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Check that every payload decodes to a PNG image
    Verify {
        #[command(flatten)]
        location: LocationArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Decode {
            location: LocationArgs::default(),
            validate_first: false,
            format: OutputFormat::Text,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or_default() {
        Commands::Decode {
            location,
            validate_first,
            format,
        } => decode::run(decode::DecodeArgs {
            location,
            validate_first,
            format,
        }),
        Commands::List { location, format } => list::run(location, format),
        Commands::Locate { location } => locate::run(location),
        Commands::Verify { location, format } => verify::run(location, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_no_subcommand_defaults_to_decode() {
        let cli = Cli::try_parse_from(["tilepack"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Commands::Decode {
                validate_first: false,
                format: OutputFormat::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_flags() {
        let cli = Cli::try_parse_from([
            "tilepack",
            "decode",
            "--base-dir",
            "/opt/game",
            "--manifest",
            "a.json",
            "--manifest",
            "b.json",
            "--output",
            "/tmp/out",
            "--validate-first",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Decode {
                location,
                validate_first,
                format,
            }) => {
                assert_eq!(location.base_dir, Some(PathBuf::from("/opt/game")));
                assert_eq!(
                    location.manifest,
                    vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
                );
                assert_eq!(location.output, Some(PathBuf::from("/tmp/out")));
                assert!(validate_first);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["tilepack", "list", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["tilepack", "verify", "--format", "yaml"]).is_err());
    }
}
