//! Manifest location command

use super::{build_decoder, LocationArgs};
use anyhow::Result;

pub fn run(location: LocationArgs) -> Result<()> {
    let decoder = build_decoder(location, None)?;
    let path = decoder.locate_manifest()?;
    println!("{}", path.display());
    Ok(())
}
