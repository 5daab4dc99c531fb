use std::time::Duration;

use ace_seq_dl::{
    catalog,
    credentials::Credentials,
    downloader::{self, OverwritePolicy},
    error::AceError,
    portal::{Portal, PortalBuilder},
    session,
};
use clap::Parser;
use reqwest::Url;
use tracing_subscriber::EnvFilter;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AceError> {
    let portal = build_portal(&args)?;
    let credentials = Credentials::resolve(&args.username).await?;

    let client = session::build_client(&portal)?;
    let token = session::login(&client, &portal, &credentials).await?;

    let catalog = catalog::build_catalog(&client, &portal, &token, &args.username).await?;

    if args.jobs.is_empty() {
        let found_jobs = catalog.job_ids();
        println!();
        println!("Found {} jobs: {}", found_jobs.len(), found_jobs.join(", "));
        println!("Use the -j flag to download.");
        println!();
        return Ok(());
    }

    let overwrite = if args.force {
        OverwritePolicy::Force
    } else {
        OverwritePolicy::Refuse
    };

    let summary = downloader::download_jobs(
        &client,
        &portal,
        &token,
        &catalog,
        &args.username,
        &args.jobs,
        &args.output_dir,
        overwrite,
    )
    .await?;

    println!("Download complete. Files placed in the ace_sequencing folder in this directory.");
    if summary.files_failed > 0 {
        println!(
            "{} file(s) failed to download; see the log output above.",
            summary.files_failed
        );
    }
    Ok(())
}

fn build_portal(args: &Args) -> Result<Portal, AceError> {
    let mut builder = PortalBuilder::default();
    if let Some(sso_url) = &args.sso_url {
        builder.sso_base(Url::parse(sso_url)?);
    }
    if let Some(data_url) = &args.data_url {
        builder.data_base(Url::parse(data_url)?);
    }
    builder.connect_timeout(Duration::from_secs_f32(args.connect_timeout));
    Ok(builder.build()?)
}
