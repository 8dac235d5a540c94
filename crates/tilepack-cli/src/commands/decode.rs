//! Decode command

use super::{build_decoder, LocationArgs, OutputFormat};
use anyhow::Result;
use tilepack_asset::{DecodePolicy, DecodeReport};

pub struct DecodeArgs {
    pub location: LocationArgs,
    pub validate_first: bool,
    pub format: OutputFormat,
}

pub fn run(args: DecodeArgs) -> Result<()> {
    // Only override the file/env policy when the flag is given
    let policy = args.validate_first.then_some(DecodePolicy::ValidateFirst);
    let decoder = build_decoder(args.location, policy)?;

    let report = decoder.decode_assets()?;
    println!("{}", render(&report, args.format)?);
    Ok(())
}

fn render(report: &DecodeReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => format!("Assets decoded to {}", report.output_root.display()),
    })
}
