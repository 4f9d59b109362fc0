use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of contribution collected for a contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PullRequest,
    Issue,
    Commit,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::PullRequest => "PRs",
            Category::Issue => "Issues",
            Category::Commit => "Commits",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One contributed artifact, normalized from whichever endpoint returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub title: String,
    pub url: String,
    /// RFC 3339 timestamp exactly as GitHub sent it.
    pub created_at: String,
    /// Login of the author. Commits made by an email that is not linked to
    /// an account have no login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ActivityItem {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        created_at: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            created_at: created_at.into(),
            author,
        }
    }

    pub fn is_authored_by(&self, login: &str) -> bool {
        self.author.as_deref() == Some(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authored_by() {
        let item = ActivityItem::new(
            "Fix typo",
            "https://github.com/o/r/pull/1",
            "2022-01-05T10:00:00Z",
            Some("alice".to_string()),
        );
        assert!(item.is_authored_by("alice"));
        assert!(!item.is_authored_by("Alice"));
        assert!(!item.is_authored_by("bob"));

        let anonymous = ActivityItem::new("x", "u", "2022-01-05T10:00:00Z", None);
        assert!(!anonymous.is_authored_by("alice"));
    }

    #[test]
    fn test_serialization_omits_missing_author() {
        let item = ActivityItem::new("x", "u", "2022-01-05T10:00:00Z", None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("author").is_none());
        assert_eq!(json["created_at"], "2022-01-05T10:00:00Z");
    }
}
