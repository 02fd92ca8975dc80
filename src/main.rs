//! Phong Pong headless entry point
//!
//! Runs one match between two computer players at a fixed frame rate and logs
//! the result. A graphical front end drives `phong_pong::driver::Game` the
//! same way from its frame callback.
//!
//! Environment:
//! - `PHONG_PONG_CONFIG`: path to a JSON match config
//! - `PHONG_PONG_SEED`, `PHONG_PONG_FRAMES`, `PHONG_PONG_FPS`
//! - `PHONG_PONG_JSON=1`: print the final frame snapshot as JSON
//! - `RUST_LOG`: log filter (e.g. `debug`)

use phong_pong::driver::{RunOptions, run_headless};
use phong_pong::scene::LogRenderer;

fn main() {
    env_logger::init();
    log::info!("Phong Pong (headless) starting...");

    let options = match RunOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let summary = run_headless(&options, &mut LogRenderer::new());
    match summary.winner {
        Some(winner) => log::info!("{winner:?} wins after {} frames", summary.frames),
        None => log::info!("No winner after {} frames", summary.frames),
    }

    if options.json {
        match summary.last.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize final frame: {e}"),
        }
    }
}
