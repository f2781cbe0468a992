// ── openpng ───────────────────────────────────────────────────────────────────
//
// Shows the open dialog and prints the chosen path.
//
//     openpng [config.json]
//
// Without a configuration file the dialog offers "PNG file (*.png)".
// Exit status 1 when nothing was chosen or the library is unavailable.

use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use ofn::{config, DialogConfig, DialogLibrary};

fn run() -> ofn::Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => config::load(Path::new(&path))?,
        None => DialogConfig::default(),
    };
    let dialog = config.to_dialog()?;

    let lib = DialogLibrary::initialize()?;
    let chosen = dialog.show(&lib);
    if let Err(e) = lib.release() {
        log::warn!("{e}");
    }

    let selection = chosen?;
    println!("Opened file: {}", selection.path.display());
    Ok(())
}

fn main() {
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    // The logger can only fail if one is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);

    if let Err(e) = run() {
        if e.is_cancelled() {
            log::info!("{e}");
        } else {
            log::error!("{e}");
        }
        std::process::exit(1);
    }
}
