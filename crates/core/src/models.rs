use serde::Deserialize;

/// A workflow run as returned by the list-runs endpoint. Only the fields the
/// pipeline reads are decoded; `created_at` stays a raw ISO-8601 string so
/// run selection is a plain lexicographic comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WorkflowRun {
    /// Sort key for "latest": a missing timestamp sorts as the empty string,
    /// after any timestamped run.
    pub fn created_at_key(&self) -> &str { self.created_at.as_deref().unwrap_or("") }

    pub fn status_str(&self) -> &str { self.status.as_deref().unwrap_or("unknown") }

    pub fn conclusion_str(&self) -> &str { self.conclusion.as_deref().unwrap_or("none") }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkflowRunList {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// A job within a workflow run, as returned by the jobs-list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl Job {
    pub fn is_completed(&self) -> bool { self.status.as_deref() == Some("completed") }

    pub fn status_str(&self) -> &str { self.status.as_deref().unwrap_or("unknown") }

    pub fn conclusion_str(&self) -> &str { self.conclusion.as_deref().unwrap_or("none") }
}

#[derive(Debug, Default, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
}
