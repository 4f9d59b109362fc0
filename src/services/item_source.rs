use super::query_builder::EndpointFamily;
use crate::models::{ActivityItem, Category};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Decodes one page of a GitHub collection into normalized items.
///
/// Listing endpoints answer with a bare array, the search endpoint wraps the
/// array in an object. Either way the paginator only sees `ActivityItem`s.
pub trait ItemSource: Send + Sync {
    fn decode_page(&self, category: Category, body: &str) -> serde_json::Result<Vec<ActivityItem>>;

    /// Whether the endpoint itself scopes results by author and date.
    fn filters_server_side(&self) -> bool;
}

/// Per-repository endpoints (`/repos/{owner}/{repo}/pulls`, `/issues`, `/commits`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingItems;

/// `/search/issues` and `/search/commits`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchItems;

impl ItemSource for ListingItems {
    fn decode_page(&self, category: Category, body: &str) -> serde_json::Result<Vec<ActivityItem>> {
        normalize(category, body, |body| serde_json::from_str(body))
    }

    fn filters_server_side(&self) -> bool {
        false
    }
}

impl ItemSource for SearchItems {
    fn decode_page(&self, category: Category, body: &str) -> serde_json::Result<Vec<ActivityItem>> {
        normalize(category, body, |body| {
            serde_json::from_str::<GitHubSearchResults<_>>(body).map(|page| page.items)
        })
    }

    fn filters_server_side(&self) -> bool {
        true
    }
}

pub fn for_family(family: EndpointFamily) -> Box<dyn ItemSource> {
    match family {
        EndpointFamily::Listing => Box::new(ListingItems),
        EndpointFamily::Search => Box::new(SearchItems),
    }
}

/// Shared by both sources; `unwrap_page` is the only part that differs.
fn normalize(
    category: Category,
    body: &str,
    unwrap_page: impl Fn(&str) -> serde_json::Result<Vec<serde_json::Value>>,
) -> serde_json::Result<Vec<ActivityItem>> {
    let raw = unwrap_page(body)?;
    let items = match category {
        Category::Commit => convert::<GitHubCommit>(raw)?,
        Category::PullRequest | Category::Issue => convert::<GitHubIssue>(raw)?,
    };

    Ok(items
        .into_iter()
        // The issues endpoints also return pull requests.
        .filter(|n| category != Category::Issue || !n.is_pull_request)
        .map(|n| n.item)
        .collect())
}

struct NormalizedItem {
    item: ActivityItem,
    is_pull_request: bool,
}

fn convert<T>(raw: Vec<serde_json::Value>) -> serde_json::Result<Vec<NormalizedItem>>
where
    T: DeserializeOwned + Into<NormalizedItem>,
{
    raw.into_iter()
        .map(|value| serde_json::from_value::<T>(value).map(Into::into))
        .collect()
}

// GitHub API response types

#[derive(Debug, Deserialize)]
struct GitHubSearchResults<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

/// Pull requests and issues share this shape.
#[derive(Debug, Deserialize)]
struct GitHubIssue {
    title: String,
    html_url: String,
    created_at: String,
    user: Option<GitHubUser>,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    html_url: String,
    commit: GitHubCommitDetail,
    author: Option<GitHubUser>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    message: String,
    author: Option<GitHubGitActor>,
    committer: Option<GitHubGitActor>,
}

#[derive(Debug, Deserialize)]
struct GitHubGitActor {
    date: Option<String>,
}

impl From<GitHubIssue> for NormalizedItem {
    fn from(issue: GitHubIssue) -> Self {
        NormalizedItem {
            is_pull_request: issue.pull_request.is_some(),
            item: ActivityItem::new(
                issue.title,
                issue.html_url,
                issue.created_at,
                issue.user.map(|u| u.login),
            ),
        }
    }
}

impl From<GitHubCommit> for NormalizedItem {
    fn from(commit: GitHubCommit) -> Self {
        let title = commit.commit.message.lines().next().unwrap_or_default().to_string();
        let created_at = commit
            .commit
            .author
            .and_then(|a| a.date)
            .or_else(|| commit.commit.committer.and_then(|c| c.date))
            .unwrap_or_default();

        NormalizedItem {
            is_pull_request: false,
            item: ActivityItem::new(title, commit.html_url, created_at, commit.author.map(|u| u.login)),
        }
    }
}
