use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tumorscan_core::candidate::ImageCandidate;
use tumorscan_core::controller::{Generation, ScanController};
use tumorscan_core::progress::{CosmeticProgress, ProgressPhase};
use tumorscan_core::session::SessionStatus;

use super::load_config;
use crate::summary::{self, ConsoleSink};

/// Extra time allowed past the configured backend delay.
const SETTLE_GRACE: Duration = Duration::from_secs(30);

#[derive(Args)]
pub struct ScanArgs {
    /// Brain scan image (JPG, PNG, ...)
    pub file: PathBuf,

    /// Scanner config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the simulated backend's choice of result
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated backend delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Skip the progress bar and report as soon as the backend answers
    #[arg(long)]
    pub no_animation: bool,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.backend.seed = Some(seed);
    }
    if let Some(delay_ms) = args.delay_ms {
        config.backend.delay_ms = delay_ms;
    }
    if args.no_animation {
        config.session.hold_for_presentation = false;
    }

    let candidate = ImageCandidate::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    summary::print_candidate(&candidate, config.upload.max_bytes);

    let mut controller = ScanController::simulated(&config, Arc::new(ConsoleSink));
    let generation = controller
        .select_image(candidate)
        .with_context(|| format!("{} was not accepted", args.file.display()))?;
    tracing::debug!(%generation, "analysis dispatched");

    if !args.no_animation {
        animate(&mut controller, CosmeticProgress::new(config.progress.clone()), generation)?;
    }

    let timeout = Duration::from_millis(config.backend.delay_ms) + SETTLE_GRACE;
    if !controller.session().is_resolved() && !controller.wait_for_backend(timeout) {
        bail!("Analysis did not finish within {}s", timeout.as_secs());
    }

    match controller.status() {
        SessionStatus::Success => {
            if let Some(result) = controller.summary() {
                summary::print_result(&result);
            }
            Ok(())
        }
        SessionStatus::Error => {
            let message = controller.session().error_message().unwrap_or_default();
            summary::print_rejected(message);
            bail!("Analysis failed")
        }
        status => bail!("Session ended in unexpected state {status}"),
    }
}

/// Run the cosmetic progress bar to completion, draining backend
/// settlements on every tick, then signal presentation complete.
fn animate(
    controller: &mut ScanController,
    mut progress: CosmeticProgress,
    generation: Generation,
) -> Result<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:32} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );

    let tick = progress.tick();
    let mut last = Instant::now();
    loop {
        std::thread::sleep(tick);
        let now = Instant::now();
        let phase = progress.advance(now - last);
        last = now;

        controller.poll();
        pb.set_message(progress.stage().to_string());
        pb.set_position((progress.fraction() * 100.0) as u64);

        if phase == ProgressPhase::Complete {
            break;
        }
    }

    pb.finish_and_clear();
    controller.presentation_complete(generation);
    Ok(())
}
