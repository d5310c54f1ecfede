#![forbid(unsafe_code)]

//! Elaris demo binary entry point.

mod cli;
mod ui;

use std::process;
use std::thread;
use std::time::Duration;

use elaris::{AppConfig, Application, CrosstermBackend, CrosstermInput};

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log_path
        && let Err(e) = elaris::logging::init_file_logging(path)
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    let (tree, screen) = match ui::build() {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Failed to build the demo screen: {e}");
            process::exit(1);
        }
    };

    tracing::debug!(root = %screen.root, status = %screen.status, "demo screen built");

    let mut config = AppConfig::from_env()
        .with_initial_focus(screen.buttons[0])
        .with_alternate_screen(opts.alt_screen);
    if let Some(fps) = opts.fps {
        config = config.with_target_fps(fps);
    }
    if opts.mouse {
        config = config.with_mouse_capture(true);
    }

    let mut app = Application::new(CrosstermBackend::new(), CrosstermInput::new(), tree, screen.root)
        .with_config(config);

    if opts.exit_after_ms > 0 {
        let handle = app.handle();
        let delay = Duration::from_millis(opts.exit_after_ms);
        thread::spawn(move || {
            thread::sleep(delay);
            handle.stop();
        });
    }

    if let Err(e) = app.run() {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }

    let summary: Vec<String> = screen
        .buttons
        .iter()
        .filter_map(|&id| app.tree().widget::<ui::Button>(id))
        .map(|button| format!("{} x{}", button.caption(), button.presses()))
        .collect();
    println!("Pressed: {}", summary.join(", "));
}
