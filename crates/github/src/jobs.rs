use std::future::Future;

use anyhow::Result;
use ci_watch_core::{
    WatchError,
    config::PollConfig,
    models::{Job, JobList},
};
use tokio::time::sleep;

use crate::GitHub;

/// Substrings that mark a job as the build job, matched against the
/// lowercased job name.
const BUILD_JOB_MARKERS: &[&str] = &["build", "build-test", "build apk"];

/// First job in list order whose name contains a build marker. The candidate
/// is re-derived on every poll attempt, so a reordered job list may hand back
/// a different job on a later attempt; callers must not assume a stable id.
pub fn find_build_job(jobs: &[Job]) -> Option<&Job> {
    jobs.iter().find(|job| {
        let name = job.name.to_lowercase();
        BUILD_JOB_MARKERS.iter().any(|marker| name.contains(marker))
    })
}

impl GitHub {
    /// Poll the run's job list until its build job reports "completed".
    pub async fn wait_for_build_job(&self, run_id: u64) -> Result<Job, WatchError> {
        let route = format!(
            "/repos/{}/{}/actions/runs/{run_id}/jobs",
            self.config.owner, self.config.repo
        );
        poll_until_complete(&self.config.poll, || {
            let route = route.clone();
            async move {
                let list: JobList = self.get_json(&route, None::<&()>).await?;
                Ok(list.jobs)
            }
        })
        .await
    }
}

/// Drive the bounded poll loop over any jobs source. Stops on the first
/// attempt whose candidate is completed; exhausting the attempt budget is a
/// timeout failure even if a candidate was seen in a non-terminal state.
pub async fn poll_until_complete<F, Fut>(
    poll: &PollConfig,
    mut fetch_jobs: F,
) -> Result<Job, WatchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<Job>>>,
{
    for attempt in 1..=poll.max_attempts {
        let jobs = fetch_jobs().await?;
        match find_build_job(&jobs) {
            Some(job) => {
                tracing::info!(
                    "Attempt {attempt}: job id={} name={} status={} conclusion={}",
                    job.id,
                    job.name,
                    job.status_str(),
                    job.conclusion_str()
                );
                if job.is_completed() {
                    return Ok(job.clone());
                }
            }
            None => tracing::info!("No build job found yet; jobs count={}", jobs.len()),
        }
        sleep(poll.interval()).await;
    }
    Err(WatchError::PollTimeout)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn job(id: u64, name: &str, status: Option<&str>) -> Job {
        Job {
            id,
            name: name.to_string(),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    fn fast_poll(max_attempts: u32) -> PollConfig {
        PollConfig { max_attempts, interval_secs: 0 }
    }

    #[test]
    fn test_find_build_job() {
        let cases: &[(&[Job], Option<u64>)] = &[
            (&[job(1, "lint", None), job(2, "build-test", None)], Some(2)),
            (&[job(1, "Build APK", None), job(2, "build", None)], Some(1)),
            (&[job(1, "lint", None), job(2, "deploy", None)], None),
            (&[job(1, "rebuild cache", None)], Some(1)),
            (&[], None),
        ];
        for (jobs, expected) in cases {
            assert_eq!(find_build_job(jobs).map(|j| j.id), *expected);
        }
    }

    #[test]
    fn test_nameless_job_never_matches() {
        assert!(find_build_job(&[Job { id: 1, ..Default::default() }]).is_none());
    }

    #[tokio::test]
    async fn test_poll_stops_on_first_completed_attempt() {
        let calls = Cell::new(0u32);
        let result = poll_until_complete(&fast_poll(10), || {
            calls.set(calls.get() + 1);
            let status = if calls.get() >= 3 { "completed" } else { "in_progress" };
            let jobs = vec![job(1, "lint", None), job(2, "Build APK", Some(status))];
            async move { Ok(jobs) }
        })
        .await
        .unwrap();
        assert_eq!(result.id, 2);
        // No fetches happen past the terminating attempt
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_poll_times_out_after_budget() {
        let calls = Cell::new(0u32);
        let err = poll_until_complete(&fast_poll(4), || {
            calls.set(calls.get() + 1);
            let jobs = vec![job(2, "build", Some("in_progress"))];
            async move { Ok(jobs) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, WatchError::PollTimeout));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_poll_times_out_when_no_job_matches() {
        let err = poll_until_complete(&fast_poll(2), || {
            let jobs = vec![job(1, "lint", Some("completed"))];
            async move { Ok(jobs) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, WatchError::PollTimeout));
    }

    #[tokio::test]
    async fn test_poll_propagates_fetch_errors() {
        let err = poll_until_complete(&fast_poll(5), || async {
            Err(anyhow::anyhow!("boom"))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, WatchError::Other(_)));
    }
}
