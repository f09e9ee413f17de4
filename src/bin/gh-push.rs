//! Upload a file to the staging release, replacing an asset of the same name.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use gh_release_tools::cli::{self, RepoArgs};
use gh_release_tools::push_asset;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Upload FILENAME as an asset of the staging release")]
struct Args {
    /// File to upload; the asset is named after its base name
    filename: PathBuf,

    #[command(flatten)]
    repo: RepoArgs,
}

fn main() {
    cli::init_logging();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            eprintln!("Usage: gh-push FILENAME");
            std::process::exit(1);
        }
    };
    cli::run(real_main(args));
}

async fn real_main(args: Args) -> Result<()> {
    let conn = args.repo.connect()?;
    let asset = push_asset(&conn.client, &conn.selector, &args.filename)
        .await
        .with_context(|| format!("Uploading {} failed", args.filename.display()))?;
    info!("{}", asset.browser_download_url);
    Ok(())
}
