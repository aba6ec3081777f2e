use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ci_watch_core::util::join_normalized;

use crate::GitHub;

impl GitHub {
    /// Download the run's log bundle to `run-<id>-logs.zip` in the working
    /// directory.
    pub async fn download_run_logs(&self, run_id: u64) -> Result<PathBuf> {
        let route = format!(
            "/repos/{}/{}/actions/runs/{run_id}/logs",
            self.config.owner, self.config.repo
        );
        let zip_path = PathBuf::from(format!("run-{run_id}-logs.zip"));
        tracing::info!("Downloading logs to {}", zip_path.display());
        let bytes = self.get_bytes(&route, self.config.timeouts.logs()).await?;
        fs::write(&zip_path, &bytes)
            .with_context(|| format!("Failed to write {}", zip_path.display()))?;
        tracing::info!("Saved {} size={}", zip_path.display(), bytes.len());
        Ok(zip_path)
    }
}

/// Extraction target for a run's logs.
pub fn extraction_dir(run_id: u64) -> PathBuf { Path::new("logs").join(format!("run-{run_id}")) }

/// Extract every archive entry into `out_dir`, preserving the archive's
/// internal relative paths. Entry paths are normalized so nothing lands
/// outside `out_dir`.
pub fn extract_archive(zip_path: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let file =
        File::open(zip_path).with_context(|| format!("Failed to open {}", zip_path.display()))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("Failed to read archive {}", zip_path.display()))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            continue;
        };
        let dest = join_normalized(out_dir, rel);
        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out =
            File::create(&dest).with_context(|| format!("Failed to create {}", dest.display()))?;
        io::copy(&mut entry, &mut out)?;
    }
    tracing::info!("Extracted to {}", out_dir.display());
    Ok(())
}
