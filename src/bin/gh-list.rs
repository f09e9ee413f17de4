//! Print the download URLs of the staging release's assets.

use anyhow::{Context, Result};
use clap::Parser;
use gh_release_tools::cli::{self, RepoArgs};
use gh_release_tools::list_asset_urls;

#[derive(Parser, Debug)]
#[command(version, about = "List download URLs of the staging release's assets")]
struct Args {
    /// Only list assets whose name contains this string
    filter: Option<String>,

    /// Embed the access token in each URL (direct download from private repositories)
    #[arg(long)]
    with_token: bool,

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
    let token = args.with_token.then_some(conn.token.as_str());
    let urls = list_asset_urls(&conn.client, &conn.selector, args.filter.as_deref(), token)
        .await
        .context("Listing assets failed")?;

    for url in urls {
        println!("{url}");
    }
    Ok(())
}
