//! Headless replay host for the orbit controller.
//!
//! Plays a scripted input sequence through `InputState`, runs the controller
//! once per tick exactly like an engine frame loop would, and prints the
//! resulting camera pose.  Useful for checking settings without a window.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use viewport_control::{OrbitController, OrbitSettings};
use viewport_core::{InputState, Transform};

use crate::script::Script;

#[derive(Debug, Parser)]
#[command(version, about = "Replay scripted viewport input through the orbit controller")]
struct Cli {
    /// TOML script with the starting pose and per-tick input
    script: PathBuf,

    /// Settings file; replaces the script's [settings] table
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Fail instead of correcting invalid settings
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let script = Script::load(&cli.script)?;
    let settings = match &cli.settings {
        Some(path) => OrbitSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => script.settings.unwrap_or_default(),
    };

    if let Err(err) = settings.validate() {
        if cli.strict {
            return Err(err).context("settings rejected (--strict)");
        }
        warn!("{err}; the controller will correct it");
    }

    run(&script, settings);
    Ok(())
}

fn run(script: &Script, settings: OrbitSettings) {
    let mut controller = OrbitController::new(settings).with_target(script.target);
    let mut camera = Transform::looking_at(script.camera, script.target, settings.up);
    let mut input = InputState::new();
    let viewport = script.viewport();

    info!(
        "replaying {} ticks in a {}x{} viewport",
        script.tick_count(),
        viewport.width,
        viewport.height
    );

    let mut frame = 0u64;
    for tick in &script.ticks {
        for _ in 0..tick.repeat {
            tick.feed(&mut input);
            controller.update(&input, &mut camera, viewport);
            input.end_frame();

            let s = controller.spherical();
            println!(
                "{frame:>5}  pos [{:>8.3} {:>8.3} {:>8.3}]  target [{:>7.3} {:>7.3} {:>7.3}]  r {:>7.3}  phi {:>6.3}  theta {:>7.3}{}",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                controller.target().x,
                controller.target().y,
                controller.target().z,
                s.radius,
                s.phi,
                s.theta,
                if controller.at_the_back() { "  back" } else { "" },
            );
            frame += 1;
        }
    }

    info!("final camera position {} facing {}", camera.position, camera.forward());
}

/// `VIEWPORT_LOG` selects the level (`error` … `trace`), default `info`.
fn init_logging() -> Result<()> {
    let level = std::env::var("VIEWPORT_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}
