use crate::error::Result;
use crate::models::{Category, DateWindow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

pub const PER_PAGE: &str = "100";

/// Which family of GitHub endpoints a run queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointFamily {
    /// Per-repository listings. Broad results, filtered locally.
    Listing,
    /// `/search/*`. Author and date are part of the query.
    Search,
}

/// Builds the request URL for each category.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    api_base_url: String,
    owner: String,
    repo: String,
    contributor: String,
    window: DateWindow,
    family: EndpointFamily,
}

impl QueryBuilder {
    pub fn new(
        api_base_url: &str,
        owner: &str,
        repo: &str,
        contributor: &str,
        window: DateWindow,
        family: EndpointFamily,
    ) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            contributor: contributor.to_string(),
            window,
            family,
        }
    }

    pub fn family(&self) -> EndpointFamily {
        self.family
    }

    pub fn query(&self, category: Category) -> Result<String> {
        match category {
            Category::PullRequest => self.pull_requests(),
            Category::Issue => self.issues(),
            Category::Commit => self.commits(),
        }
    }

    pub fn pull_requests(&self) -> Result<String> {
        match self.family {
            EndpointFamily::Listing => {
                self.listing("pulls", &[("state", "all"), ("per_page", PER_PAGE)])
            }
            EndpointFamily::Search => self.search_issues("pr"),
        }
    }

    pub fn issues(&self) -> Result<String> {
        match self.family {
            // `since` filters on the update time, which is never before the creation time.
            EndpointFamily::Listing => {
                let since = self.window.start_timestamp();
                self.listing(
                    "issues",
                    &[
                        ("state", "all"),
                        ("creator", self.contributor.as_str()),
                        ("since", since.as_str()),
                        ("per_page", PER_PAGE),
                    ],
                )
            }
            EndpointFamily::Search => self.search_issues("issue"),
        }
    }

    pub fn commits(&self) -> Result<String> {
        match self.family {
            EndpointFamily::Listing => {
                let since = self.window.start_timestamp();
                let until = self.window.end_timestamp();
                self.listing(
                    "commits",
                    &[
                        ("author", self.contributor.as_str()),
                        ("since", since.as_str()),
                        ("until", until.as_str()),
                        ("per_page", PER_PAGE),
                    ],
                )
            }
            EndpointFamily::Search => {
                let q = format!(
                    "repo:{}/{} author:{} author-date:{}",
                    self.owner,
                    self.repo,
                    self.contributor,
                    self.date_range()
                );
                self.search("commits", &q)
            }
        }
    }

    fn listing(&self, resource: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/{}",
            self.api_base_url, self.owner, self.repo, resource
        );
        Ok(Url::parse_with_params(&url, params)?.to_string())
    }

    fn search_issues(&self, kind: &str) -> Result<String> {
        let q = format!(
            "repo:{}/{} type:{} author:{} created:{}",
            self.owner,
            self.repo,
            kind,
            self.contributor,
            self.date_range()
        );
        self.search("issues", &q)
    }

    fn search(&self, resource: &str, q: &str) -> Result<String> {
        let url = format!("{}/search/{}", self.api_base_url, resource);
        Ok(Url::parse_with_params(&url, &[("q", q), ("per_page", PER_PAGE)])?.to_string())
    }

    fn date_range(&self) -> String {
        format!("{}..{}", self.window.start_date(), self.window.end_date())
    }
}
