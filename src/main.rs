use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use umbra::config::{RenderSettings, SceneFile};
use umbra::error::ConfigError;
use umbra::output::{save_image, send_image_to_tev};
use umbra::render::{render_with_stats, RenderConfig};
use umbra::scene::Scene;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Resolve the scene and render settings from the scene file and flags.
fn load_inputs(args: &Args) -> Result<(Scene, RenderConfig), ConfigError> {
    let (scene, file_settings) = match &args.config {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            let file = SceneFile::load(path)?;
            (file.scene()?, file.settings())
        }
        None => (Scene::reference(), RenderSettings::default()),
    };
    let config = args.settings().or(file_settings).resolve()?;
    Ok((scene, config))
}

fn progress_bar(config: &RenderConfig) -> ProgressBar {
    let pb = ProgressBar::new(u64::from(config.width()) * u64::from(config.height()));
    match ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
        Ok(style) => pb.set_style(style),
        Err(e) => warn!("Invalid progress bar template: {}", e),
    }
    pb
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("umbra - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if args.threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
        {
            warn!("Could not configure {} render threads: {}", args.threads, e);
        }
    }

    let (scene, config) = match load_inputs(&args) {
        Ok(inputs) => inputs,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (image, stats) = render_with_stats(&scene, &config, &progress_bar(&config));
    info!(
        "{} lit, {} shadowed, {} background pixels",
        stats.lit, stats.shadowed, stats.background
    );

    if args.tev || args.tev_address.is_some() {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost");
        if let Err(e) = send_image_to_tev(&image, tev_address) {
            warn!("{}", e);
        }
    }

    if let Err(e) = save_image(&image, &args.output) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
