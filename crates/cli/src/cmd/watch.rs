use argp::FromArgs;
use ci_watch_core::{WatchError, config::WatchConfig};
use ci_watch_github::{GitHub, logs};
use ci_watch_scan::{render_report, scan_tree};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Wait for the latest run's build job, then download and scan its logs.
#[argp(subcommand, name = "watch")]
pub struct Args {}

pub async fn run(_args: Args) -> Result<(), WatchError> {
    let config = WatchConfig::load()?;
    let github = GitHub::new(config)?;

    let run = github.latest_run().await?;
    tracing::info!(
        "Found run id {} status {} conclusion {}",
        run.id,
        run.status_str(),
        run.conclusion_str()
    );

    github.wait_for_build_job(run.id).await?;

    let zip_path = github.download_run_logs(run.id).await?;
    let out_dir = logs::extraction_dir(run.id);
    logs::extract_archive(&zip_path, &out_dir)?;

    let excerpts = scan_tree(&out_dir);
    println!("{}", render_report(&excerpts));
    println!("Done");
    Ok(())
}
