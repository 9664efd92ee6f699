//! mode13 command-line entry point
//!
//! Usage:
//!   mode13                 Show the built-in demo scene
//!   mode13 scene.ron       Show a scene file
//!   mode13 --png out.png   Render one frame to an image, no window

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use mode13::app;
use mode13::config::{parse_args, Action, Config, Options, USAGE};
use mode13::logging::{init_logging, LoggingConfig};
use mode13::scene::{load_scene, Scene};

fn run(options: Options) -> Result<()> {
    let mut config = Config::load(&options.config)?;
    config.apply(&options);

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });
    log::info!("=== mode13 v{} ===", mode13::VERSION);

    let scene = match &config.scene {
        Some(path) => load_scene(path).with_context(|| format!("loading scene {}", path.display()))?,
        None => Scene::demo(),
    };

    if let Some(png) = &options.png {
        return app::render_headless(&scene, png);
    }

    macroquad::Window::from_config(app::window_conf(&config), app::run(config, scene));
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args(env::args().skip(1)) {
        Ok(Action::Run(options)) => options,
        Ok(Action::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
