//! Download the staging release's assets into the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use gh_release_tools::cli::{self, RepoArgs};
use gh_release_tools::download_assets;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Download assets of the staging release")]
struct Args {
    /// Only download assets whose name contains this string
    filter: Option<String>,

    /// Directory to write the assets to
    #[arg(long, short = 'd', default_value = ".")]
    dir: PathBuf,

    #[command(flatten)]
    repo: RepoArgs,
}

fn main() {
    cli::init_logging();
    let args = Args::parse();
    cli::run(real_main(args));
}

async fn real_main(args: Args) -> Result<()> {
    let conn = args.repo.connect()?;
    let downloaded = download_assets(
        &conn.client,
        &conn.selector,
        args.filter.as_deref(),
        &args.dir,
    )
    .await
    .context("Download failed")?;

    if downloaded.is_empty() {
        info!("No matching assets on the {}", conn.selector);
    }
    for asset in &downloaded {
        info!("Wrote {} ({} bytes)", asset.path.display(), asset.bytes);
    }
    Ok(())
}
