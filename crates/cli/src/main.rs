mod cmd;
mod util;

use argp::FromArgs;
use ci_watch_core::WatchError;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Watch GitHub Actions builds and surface failure excerpts from run logs.
struct TopLevel {
    #[argp(subcommand)]
    command: Command,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argp(subcommand)]
enum Command {
    Watch(cmd::watch::Args),
    Scan(cmd::scan::Args),
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let args: TopLevel = argp::parse_args_or_exit(argp::DEFAULT);
    let result = match args.command {
        Command::Watch(args) => cmd::watch::run(args).await,
        Command::Scan(args) => cmd::scan::run(args),
    };
    if let Err(e) = result {
        match &e {
            WatchError::Other(err) => eprintln!("Error during CI fetch: {err:?}"),
            _ => eprintln!("{e}"),
        }
        std::process::exit(e.exit_code());
    }
}
