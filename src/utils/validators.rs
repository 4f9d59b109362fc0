use crate::error::{Result, StatsError};
use chrono::NaiveDate;
use url::Url;

/// Validate that a string is a valid URL with http or https scheme
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    // Only allow http and https schemes
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(StatsError::InvalidInput(format!(
            "URL must use http or https scheme, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(StatsError::InvalidInput("URL must have a host".to_string()));
    }

    Ok(url)
}

/// Validate username (alphanumeric and hyphens, 1-39 chars, no leading hyphen)
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > 39 {
        return Err(StatsError::InvalidInput(format!(
            "Username '{}' must be between 1 and 39 characters",
            username
        )));
    }

    if username.starts_with('-')
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(StatsError::InvalidInput(format!(
            "Username '{}' can only contain alphanumeric characters and hyphens",
            username
        )));
    }

    Ok(())
}

/// Validate a contributor login. GitHub App accounts carry a `[bot]` suffix
/// (`dependabot[bot]`) on top of an ordinary username.
pub fn validate_login(login: &str) -> Result<()> {
    let base = login.strip_suffix("[bot]").unwrap_or(login);
    validate_username(base)
}

/// Validate a repository name: 1-100 chars of alphanumerics, '-', '_' and '.'
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 100 || name == "." || name == ".." {
        return Err(StatsError::InvalidInput(format!(
            "Invalid repository name '{}'",
            name
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(StatsError::InvalidInput(format!(
            "Repository name '{}' contains unsupported characters",
            name
        )));
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| StatsError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}
