//! PNG verification command

use super::{build_decoder, LocationArgs, OutputFormat};
use anyhow::Result;

pub fn run(location: LocationArgs, format: OutputFormat) -> Result<()> {
    let decoder = build_decoder(location, None)?;
    let (path, report) = decoder.verify()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("Verification: {}", path.display());
            report.print_summary();
        }
    }

    if !report.passed() {
        anyhow::bail!(
            "{} payload(s) failed verification",
            report.count_by_status(tilepack_asset::CheckStatus::Fail)
        );
    }
    Ok(())
}
