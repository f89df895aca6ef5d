use std::path::Path;
use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod constants;
mod filename;
mod player;
mod presenter;
mod selection;
mod slide;
mod state;
mod store;
mod texture_loader;
mod timer;
mod transition;
mod ui;

use crate::cli::Args;
use crate::config::ImageRef;
use crate::constants::*;
use crate::presenter::Presenter;
use crate::store::{ConfigStore, FileStore, MemoryStore};
use crate::texture_loader::{Textures, load_gallery, load_sorted_image_paths};
use crate::transition::transition_factory;
use crate::ui::View;

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Portfolio Presentation")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape belongs to the editor
    rl.set_exit_key(None);
    if args.fullscreen {
        rl.toggle_fullscreen();
    }

    {
        let (width, height) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mut d = rl.begin_drawing(&thread);
        ui::screens::draw_loading(&mut d, width, height);
    }

    // --- Discover Images ---
    // Textures are declared after the window so they are released first
    let (universe, mut textures) = discover(&mut rl, &thread, &args.image_directory);

    // --- Configuration Store ---
    let store: Box<dyn ConfigStore> = if args.ephemeral {
        info!("Slide configuration kept in memory only");
        Box::new(MemoryStore::new())
    } else {
        let file_store = FileStore::new(args.config.clone().unwrap_or_else(FileStore::default_path));
        info!(path = ?file_store.path(), "Using slide configuration file");
        Box::new(file_store)
    };

    let mut presenter = Presenter::new(universe, store, transition_factory(args.seed));
    info!(images = presenter.selected().len(), screen = ?presenter.screen(), "Presentation ready");
    let mut view = View::new(args.image_directory.display().to_string(), presenter.screen());

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if view.rescan_requested(&rl, &presenter) {
            let (universe, reloaded) = discover(&mut rl, &thread, &args.image_directory);
            textures = reloaded;
            presenter.rediscover(universe);
        }
        view.handle_input(&mut rl, &mut presenter);
        presenter.update(dt);
        view.update(dt, &presenter);

        let (width, height) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mouse = rl.get_mouse_position();
        let mut d = rl.begin_drawing(&thread);
        view.draw(&mut d, &presenter, &textures, mouse, width, height);
    }

    Ok(())
}

/// Scans `dir` and loads every displayable image. An unreadable directory
/// is logged and reads as empty.
fn discover(rl: &mut RaylibHandle, thread: &RaylibThread, dir: &Path) -> (Vec<ImageRef>, Textures) {
    let image_paths = match load_sorted_image_paths(dir) {
        Ok(paths) => paths,
        Err(e) => {
            error!("Error listing images in {:?}: {e:#}", dir);
            Vec::new()
        }
    };
    let (universe, textures) = load_gallery(rl, thread, &image_paths);
    if universe.is_empty() {
        warn!(dir = ?dir, "No displayable images found");
    }
    (universe, textures)
}
