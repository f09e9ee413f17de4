//! Open `FILE LINE` in the viewer or the text editor, depending on the
//! file's extension. Does nothing when fewer than two arguments are given;
//! arguments it does not understand are ignored.

use clap::Parser;
use gh_release_tools::cli;
use gh_release_tools::config::ReleaseConfig;
use gh_release_tools::editor::{self, SystemLauncher};
use log::warn;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Open FILE at LINE in the matching tool", ignore_errors = true)]
struct Args {
    file: Option<PathBuf>,
    line: Option<String>,

    /// Ignored
    #[arg(hide = true)]
    rest: Vec<String>,

    /// Path to configuration file
    #[arg(long, short = 'c', env = gh_release_tools::config::CONFIG_ENV)]
    config: Option<PathBuf>,
}

fn main() {
    cli::init_logging();
    let args = Args::parse();
    let (Some(file), Some(line)) = (args.file, args.line) else {
        return;
    };

    let config = match std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| Ok(ReleaseConfig::load(args.config.as_deref(), &cwd)?))
    {
        Ok(config) => config,
        Err(e) => {
            warn!("{e:#}; using default editors");
            ReleaseConfig::default()
        }
    };

    match editor::open(&mut SystemLauncher, &config.editor, &file, &line) {
        Ok(Some(0) | None) => {}
        Ok(Some(code)) => warn!("editor exited with status {code}"),
        Err(e) => cli::fail(e),
    }
}
