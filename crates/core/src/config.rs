use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Repository and branch watched when no `config.yml` overrides them.
pub const DEFAULT_OWNER: &str = "tbmobb813";
pub const DEFAULT_REPO: &str = "blurapp";
pub const DEFAULT_BRANCH: &str = "comp/implement";
pub const DEFAULT_TOKEN_PATH: &str = ".secrets/gh_pat";

/// User-Agent sent with every API request.
pub const USER_AGENT: &str = "ci-watcher";

const CONFIG_PATH: &str = "config.yml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token_path: PathBuf,
    pub poll: PollConfig,
    pub timeouts: TimeoutConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            poll: PollConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl WatchConfig {
    /// Load `config.yml` from the working directory, falling back to the
    /// compiled-in defaults when it does not exist.
    pub fn load() -> Result<Self> { Self::load_from(Path::new(CONFIG_PATH)) }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let file = BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        );
        serde_yaml::from_reader(file).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self { Self { max_attempts: 120, interval_secs: 6 } }
}

impl PollConfig {
    pub fn interval(&self) -> Duration { Duration::from_secs(self.interval_secs) }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub api_secs: u64,
    pub logs_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self { Self { api_secs: 30, logs_secs: 120 } }
}

impl TimeoutConfig {
    pub fn api(&self) -> Duration { Duration::from_secs(self.api_secs) }

    pub fn logs(&self) -> Duration { Duration::from_secs(self.logs_secs) }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.owner, DEFAULT_OWNER);
        assert_eq!(config.repo, DEFAULT_REPO);
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
        assert_eq!(config.poll.max_attempts, 120);
        assert_eq!(config.poll.interval(), Duration::from_secs(6));
        assert_eq!(config.timeouts.api(), Duration::from_secs(30));
        assert_eq!(config.timeouts.logs(), Duration::from_secs(120));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WatchConfig::load_from(&dir.path().join("config.yml")).unwrap();
        assert_eq!(config.branch, DEFAULT_BRANCH);
    }

    #[test]
    fn test_load_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "owner: foo\nrepo: bar\nbranch: main\npoll:\n  interval_secs: 1").unwrap();
        let config = WatchConfig::load_from(&path).unwrap();
        assert_eq!(config.owner, "foo");
        assert_eq!(config.repo, "bar");
        assert_eq!(config.branch, "main");
        assert_eq!(config.poll.interval(), Duration::from_secs(1));
        // Unset fields keep their defaults
        assert_eq!(config.poll.max_attempts, 120);
        assert_eq!(config.timeouts.logs_secs, 120);
    }
}
