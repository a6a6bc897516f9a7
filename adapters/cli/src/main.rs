#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Wander experience.

mod config;
mod driver;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use maze_wander_core::{LayoutMode, MazeGenerator};
use maze_wander_generation::DungeonGenerator;
use maze_wander_rendering::{Color, Presentation, RenderingBackend, Scene};
use maze_wander_rendering_macroquad::MacroquadBackend;

use crate::config::Config;
use crate::driver::FrameDriver;

/// Command-line options for the Maze Wander binary.
#[derive(Debug, Parser)]
#[command(name = "maze-wander", about = "Wander a procedurally generated maze")]
struct Args {
    /// Seed for the maze generator; omit for a random maze each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Use the coarse touch-friendly layout instead of the standard one.
    #[arg(long)]
    compact: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Path to a TOML config file overriding the built-in tunables.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Entry point for the Maze Wander command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let mode = if args.compact {
        LayoutMode::Compact
    } else {
        LayoutMode::Standard
    };

    let generator: Box<dyn MazeGenerator> = match args.seed {
        Some(seed) => Box::new(DungeonGenerator::seeded(seed)),
        None => Box::new(DungeonGenerator::from_entropy()),
    };
    let mut frame_driver = FrameDriver::new(&config, mode, generator);

    let presentation = Presentation::new(
        "Maze Wander",
        Color::from_rgb_u8(18, 18, 22),
        Scene::empty(),
    );
    let backend = MacroquadBackend::new()
        .with_vsync(true)
        .with_show_fps(args.show_fps)
        .with_swipe_min_distance(config.swipe_min_distance_px);

    backend.run(presentation, move |dt, input, scene| {
        frame_driver.frame(dt, input, scene);
    })
}
