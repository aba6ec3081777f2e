use ci_watch_core::{
    WatchError,
    models::{WorkflowRun, WorkflowRunList},
};
use serde::Serialize;

use crate::GitHub;

#[derive(Serialize)]
struct RunListParams<'a> {
    branch: &'a str,
    per_page: u8,
}

impl GitHub {
    /// List recent runs for the configured branch and pick the most recent.
    pub async fn latest_run(&self) -> Result<WorkflowRun, WatchError> {
        tracing::info!("Querying workflow runs for branch {}", self.config.branch);
        let route = format!("/repos/{}/{}/actions/runs", self.config.owner, self.config.repo);
        let list: WorkflowRunList = self
            .get_json(&route, Some(&RunListParams { branch: &self.config.branch, per_page: 10 }))
            .await?;
        select_latest(list.workflow_runs)
            .ok_or_else(|| WatchError::NoRuns(self.config.branch.clone()))
    }
}

/// "Latest" is decided by the `created_at` string alone, never by run id
/// order. Missing timestamps sort as the empty string, last.
pub fn select_latest(mut runs: Vec<WorkflowRun>) -> Option<WorkflowRun> {
    runs.sort_by(|a, b| b.created_at_key().cmp(a.created_at_key()));
    runs.into_iter().next()
}
