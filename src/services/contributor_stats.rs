use super::date_filter::is_within_date_range;
use super::item_source::{self, ItemSource};
use super::paginator::Paginator;
use super::query_builder::QueryBuilder;
use super::transport::Transport;
use crate::error::Result;
use crate::models::{ActivityItem, Category, DateWindow, Statistics};
use crate::utils::config::Config;
use std::time::{Duration, Instant};

/// Collects a contributor's activity in one repository into [`Statistics`].
pub struct ContributorStatsService<'a> {
    paginator: Paginator<'a>,
    queries: QueryBuilder,
    source: Box<dyn ItemSource>,
    contributor: String,
    window: DateWindow,
    include_commits: bool,
}

impl<'a> ContributorStatsService<'a> {
    pub fn new(transport: &'a dyn Transport, config: &Config) -> Self {
        let queries = QueryBuilder::new(
            &config.api_base_url,
            &config.owner,
            &config.repo,
            &config.contributor,
            config.window,
            config.endpoint,
        );

        Self {
            paginator: Paginator::new(
                transport,
                config.token.clone(),
                config.page_delay,
                config.debug,
            ),
            source: item_source::for_family(queries.family()),
            queries,
            contributor: config.contributor.clone(),
            window: config.window,
            include_commits: config.include_commits,
        }
    }

    /// Fetch commits (when requested), pull requests and issues, in that order.
    ///
    /// The first failure aborts the run and no partial statistics are returned.
    pub async fn collect(&self) -> Result<Statistics> {
        let commits = if self.include_commits {
            Some(self.fetch_category(Category::Commit).await?)
        } else {
            None
        };

        let pull_requests = self.fetch_category(Category::PullRequest).await?;
        let issues = self.fetch_category(Category::Issue).await?;

        Ok(Statistics::new(pull_requests, issues, commits))
    }

    async fn fetch_category(&self, category: Category) -> Result<Vec<ActivityItem>> {
        let url = self.queries.query(category)?;

        let started = Instant::now();
        let fetched = self
            .paginator
            .fetch_all(&url, category, self.source.as_ref())
            .await?;
        let elapsed = started.elapsed();
        let fetched_count = fetched.len();

        // The commit listing already scopes by author and since/until.
        let kept = if category == Category::Commit || self.source.filters_server_side() {
            fetched
        } else {
            self.retain_contributions(fetched)
        };

        log::info!(
            "📊 {} request took {}: {} fetched, {} kept",
            category,
            format_elapsed(elapsed),
            fetched_count,
            kept.len()
        );

        Ok(kept)
    }

    fn retain_contributions(&self, items: Vec<ActivityItem>) -> Vec<ActivityItem> {
        let start = self.window.start_timestamp();
        let end = self.window.end_timestamp();

        items
            .into_iter()
            .filter(|item| {
                item.is_authored_by(&self.contributor)
                    && is_within_date_range(&item.created_at, &start, &end)
            })
            .collect()
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use crate::services::query_builder::EndpointFamily;
    use crate::services::transport::fake::ScriptedTransport;
    use crate::StatsError;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const BASE: &str = "https://api.github.com";

    fn config(family: EndpointFamily, include_commits: bool) -> Config {
        Config {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            contributor: "alice".to_string(),
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 1, 31).unwrap(),
            )
            .unwrap(),
            include_commits,
            token: None,
            debug: false,
            endpoint: family,
            api_base_url: BASE.to_string(),
            page_delay: Duration::ZERO,
            output: PathBuf::from("statistics.html"),
            format: ReportFormat::Html,
        }
    }

    fn queries(config: &Config) -> QueryBuilder {
        QueryBuilder::new(
            &config.api_base_url,
            &config.owner,
            &config.repo,
            &config.contributor,
            config.window,
            config.endpoint,
        )
    }

    fn issue(n: u32, login: &str, created_at: &str) -> String {
        format!(
            r#"{{"title": "Item {n}", "html_url": "https://github.com/octo/hello/pull/{n}",
                "created_at": "{created_at}", "user": {{"login": "{login}"}}}}"#
        )
    }

    fn commit(sha: &str, date: &str) -> String {
        format!(
            r#"{{"sha": "{sha}", "html_url": "https://github.com/octo/hello/commit/{sha}",
                "commit": {{"message": "Commit {sha}", "author": {{"date": "{date}"}}}},
                "author": {{"login": "alice"}}}}"#
        )
    }

    fn titles(items: &[ActivityItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_listing_filters_by_author_and_window() {
        let config = config(EndpointFamily::Listing, false);
        let q = queries(&config);
        let prs = q.pull_requests().unwrap();
        let prs_page_2 = format!("{}&page=2", prs);

        let transport = ScriptedTransport::new()
            .route(
                &prs,
                200,
                Some(format!(r#"<{}>; rel="next""#, prs_page_2)),
                &format!(
                    "[{},{},{}]",
                    issue(1, "alice", "2022-01-05T10:00:00Z"),
                    issue(2, "bob", "2022-01-06T10:00:00Z"),
                    issue(3, "alice", "2022-01-07T10:00:00Z")
                ),
            )
            .route(
                &prs_page_2,
                200,
                None,
                // Equal to the widened window end, so outside.
                &format!("[{}]", issue(4, "alice", "2022-01-31T23:59:59Z")),
            )
            .route(&q.issues().unwrap(), 200, None, "[]");

        let stats = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap();

        assert_eq!(stats.prs_count(), 2);
        assert_eq!(titles(stats.pull_requests()), vec!["Item 1", "Item 3"]);
        assert_eq!(stats.issues_count(), 0);
        assert_eq!(stats.commits_count(), None);
        assert!(stats.commits().is_none());
        assert_eq!(transport.requested_urls(), vec![prs.clone(), prs_page_2, q.issues().unwrap()]);
    }

    #[tokio::test]
    async fn test_listing_drops_items_outside_window_and_unparsable() {
        let config = config(EndpointFamily::Listing, false);
        let q = queries(&config);

        let transport = ScriptedTransport::new()
            .route(&q.pull_requests().unwrap(), 200, None, "[]")
            .route(
                &q.issues().unwrap(),
                200,
                None,
                &format!(
                    "[{},{},{}]",
                    issue(1, "alice", "2021-12-31T10:00:00Z"),
                    issue(2, "alice", "not a date"),
                    issue(3, "alice", "2022-01-20T10:00:00Z")
                ),
            );

        let stats = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap();

        assert_eq!(titles(stats.issues()), vec!["Item 3"]);
    }

    #[tokio::test]
    async fn test_commits_fetched_first_and_kept_as_is() {
        let config = config(EndpointFamily::Listing, true);
        let q = queries(&config);

        let transport = ScriptedTransport::new()
            .route(
                &q.commits().unwrap(),
                200,
                None,
                // The since/until window is trusted, even for a boundary date.
                &format!("[{},{}]", commit("abc", "2022-01-03T00:00:00Z"), commit("def", "2022-01-01T00:00:00Z")),
            )
            .route(&q.pull_requests().unwrap(), 200, None, "[]")
            .route(&q.issues().unwrap(), 200, None, "[]");

        let stats = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap();

        assert_eq!(stats.commits_count(), Some(2));
        assert_eq!(stats.commits().map(titles), Some(vec!["Commit abc", "Commit def"]));
        assert_eq!(transport.requested_urls()[0], q.commits().unwrap());
    }

    #[tokio::test]
    async fn test_commit_fields_present_but_empty() {
        let config = config(EndpointFamily::Listing, true);
        let q = queries(&config);

        let transport = ScriptedTransport::new()
            .route(&q.commits().unwrap(), 200, None, "[]")
            .route(&q.pull_requests().unwrap(), 200, None, "[]")
            .route(&q.issues().unwrap(), 200, None, "[]");

        let stats = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap();

        assert_eq!(stats.commits_count(), Some(0));
        assert_eq!(stats.commits().map(<[ActivityItem]>::len), Some(0));
    }

    #[tokio::test]
    async fn test_search_results_are_not_filtered_locally() {
        let config = config(EndpointFamily::Search, false);
        let q = queries(&config);
        let wrap = |items: String| format!(r#"{{"total_count": 1, "incomplete_results": false, "items": [{}]}}"#, items);

        let transport = ScriptedTransport::new()
            .route(
                &q.pull_requests().unwrap(),
                200,
                None,
                &wrap(issue(1, "alice", "2022-01-31T23:59:59Z")),
            )
            .route(&q.issues().unwrap(), 200, None, &wrap(issue(2, "alice", "2022-01-10T00:00:00Z")));

        let stats = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap();

        assert_eq!(stats.prs_count(), 1);
        assert_eq!(stats.issues_count(), 1);
    }

    #[tokio::test]
    async fn test_forbidden_issues_request_fails_whole_run() {
        let config = config(EndpointFamily::Listing, true);
        let q = queries(&config);

        let transport = ScriptedTransport::new()
            .route(&q.commits().unwrap(), 200, None, &format!("[{}]", commit("abc", "2022-01-03T00:00:00Z")))
            .route(&q.pull_requests().unwrap(), 200, None, &format!("[{}]", issue(1, "alice", "2022-01-05T10:00:00Z")))
            .route(&q.issues().unwrap(), 403, None, r#"{"message": "API rate limit exceeded"}"#);

        let err = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.is_rate_limited());
        // Each request was issued exactly once; nothing was retried.
        assert_eq!(transport.requested_urls().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_before_any_request() {
        let mut config = config(EndpointFamily::Listing, false);
        config.api_base_url = "not a url".to_string();
        let transport = ScriptedTransport::new();

        let err = ContributorStatsService::new(&transport, &config)
            .collect()
            .await
            .unwrap_err();

        assert!(matches!(err, StatsError::InvalidUrl(_)));
        assert!(transport.requested_urls().is_empty());
    }
}
