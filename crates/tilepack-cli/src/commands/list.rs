//! Dry-run listing of decode targets

use super::{build_decoder, LocationArgs, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tilepack_asset::{plan, PlannedAsset};

#[derive(Debug, Serialize)]
struct Listing {
    manifest_path: PathBuf,
    output_root: PathBuf,
    assets: Vec<PlannedAsset>,
}

pub fn run(location: LocationArgs, format: OutputFormat) -> Result<()> {
    let decoder = build_decoder(location, None)?;
    let (manifest_path, manifest) = decoder.load_manifest()?;
    let output_root = decoder.config().output_dir.clone();
    let assets = plan(&manifest, &output_root)?;

    let listing = Listing {
        manifest_path,
        output_root,
        assets,
    };
    println!("{}", render(&listing, format)?);
    Ok(())
}

fn render(listing: &Listing, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(listing)?);
    }

    let mut lines = vec![format!(
        "Manifest: {} ({} files -> {})",
        listing.manifest_path.display(),
        listing.assets.len(),
        listing.output_root.display()
    )];
    for asset in &listing.assets {
        lines.push(format!(
            "  {}/{} #{}  {}",
            asset.category,
            asset.name,
            asset.index,
            asset.path.display()
        ));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{temp_dir, SAMPLE_MANIFEST};
    use std::fs;
    use tilepack_asset::Manifest;

    #[test]
    fn test_text_listing() {
        let manifest: Manifest = serde_json::from_str(SAMPLE_MANIFEST).unwrap();
        let root = PathBuf::from("/out");
        let listing = Listing {
            manifest_path: PathBuf::from("/game/assets_data.json"),
            assets: plan(&manifest, &root).unwrap(),
            output_root: root,
        };

        let text = render(&listing, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Manifest: /game/assets_data.json (3 files -> /out)");
        assert!(lines.contains(&"  fx/explosion #1  /out/fx/explosion/explosion_1.png"));
        assert!(lines.contains(&"  tiles/grass #1  /out/tiles/grass/grass.png"));
    }

    #[test]
    fn test_listing_writes_nothing() {
        let dir = temp_dir();
        fs::write(dir.join("assets_data.json"), SAMPLE_MANIFEST).unwrap();

        let location = LocationArgs {
            base_dir: Some(dir.clone()),
            ..Default::default()
        };
        run(location, OutputFormat::Json).unwrap();
        assert!(!dir.join("assets").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
