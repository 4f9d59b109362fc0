use super::activity::ActivityItem;
use serde::Serialize;

/// Aggregated activity of one contributor in one repository.
///
/// Counts are derived from the item lists at construction, so a count always
/// matches the length of its list. Commit fields exist only when commits were
/// collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    prs_count: usize,
    pr_stats: Vec<ActivityItem>,
    issues_count: usize,
    issue_stats: Vec<ActivityItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commits_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_stats: Option<Vec<ActivityItem>>,
}

impl Statistics {
    pub fn new(
        pull_requests: Vec<ActivityItem>,
        issues: Vec<ActivityItem>,
        commits: Option<Vec<ActivityItem>>,
    ) -> Self {
        Self {
            prs_count: pull_requests.len(),
            pr_stats: pull_requests,
            issues_count: issues.len(),
            issue_stats: issues,
            commits_count: commits.as_ref().map(Vec::len),
            commit_stats: commits,
        }
    }

    pub fn prs_count(&self) -> usize {
        self.prs_count
    }

    pub fn pull_requests(&self) -> &[ActivityItem] {
        &self.pr_stats
    }

    pub fn issues_count(&self) -> usize {
        self.issues_count
    }

    pub fn issues(&self) -> &[ActivityItem] {
        &self.issue_stats
    }

    pub fn commits_count(&self) -> Option<usize> {
        self.commits_count
    }

    pub fn commits(&self) -> Option<&[ActivityItem]> {
        self.commit_stats.as_deref()
    }
}
