use std::path::Path;

use anyhow::anyhow;
use argp::FromArgs;
use ci_watch_core::WatchError;
use ci_watch_scan::{render_report, scan_tree};
use typed_path::Utf8NativePathBuf;

use crate::util::native_path;

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Re-scan an already extracted log directory and print the report.
#[argp(subcommand, name = "scan")]
pub struct Args {
    #[argp(positional, from_str_fn(native_path))]
    /// extracted log directory (e.g. logs/run-123)
    dir: Utf8NativePathBuf,
}

pub fn run(args: Args) -> Result<(), WatchError> {
    let dir = args.dir.with_platform_encoding();
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() {
        return Err(WatchError::Other(anyhow!("No such directory: {}", args.dir)));
    }
    let excerpts = scan_tree(dir);
    println!("{}", render_report(&excerpts));
    Ok(())
}
