pub mod config;
pub mod models;
pub mod util;

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline failure, split into the conditions that carry their own exit code
/// and a catch-all for everything else.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("credential file not found at {}", .0.display())]
    MissingCredential(PathBuf),
    #[error("no workflow runs found for branch {0}")]
    NoRuns(String),
    #[error("timed out waiting for build job to complete")]
    PollTimeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoRuns(_) => 1,
            Self::MissingCredential(_) => 2,
            Self::PollTimeout => 3,
            Self::Other(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WatchError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(WatchError::NoRuns("main".into()).exit_code(), 1);
        assert_eq!(WatchError::MissingCredential(".secrets/gh_pat".into()).exit_code(), 2);
        assert_eq!(WatchError::PollTimeout.exit_code(), 3);
        assert_eq!(WatchError::Other(anyhow::anyhow!("boom")).exit_code(), 4);
    }
}
