use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tumorscan_core::candidate::ImageCandidate;

use super::load_config;
use crate::summary;

#[derive(Args)]
pub struct CheckArgs {
    /// Image file to check
    pub file: PathBuf,

    /// Scanner config file (TOML), for a non-default size limit
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let candidate = ImageCandidate::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    summary::print_candidate(&candidate, config.upload.max_bytes);

    match candidate.validate(config.upload.max_bytes) {
        Ok(image) => {
            summary::print_accepted(&image.name);
            Ok(())
        }
        Err(e) => {
            summary::print_rejected(&e.to_string());
            bail!("{} failed pre-flight checks", args.file.display())
        }
    }
}
