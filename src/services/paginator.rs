use super::item_source::ItemSource;
use super::transport::Transport;
use crate::error::{Result, StatsError};
use crate::models::{ActivityItem, Category};
use std::time::Duration;

/// Constant pause between page requests to stay clear of GitHub's abuse limits.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(10);

/// Drains a paginated GitHub collection by following `rel="next"` links.
pub struct Paginator<'a> {
    transport: &'a dyn Transport,
    token: Option<String>,
    page_delay: Duration,
    debug: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        token: Option<String>,
        page_delay: Duration,
        debug: bool,
    ) -> Self {
        Self {
            transport,
            token,
            page_delay,
            debug,
        }
    }

    /// Fetch `url` and every page after it, returning all items in server order.
    ///
    /// The first failing page fails the whole call; items from earlier pages
    /// are dropped.
    pub async fn fetch_all(
        &self,
        url: &str,
        category: Category,
        source: &dyn ItemSource,
    ) -> Result<Vec<ActivityItem>> {
        let mut all_items = Vec::new();
        let mut next = Some(url.to_string());
        let mut page = 0;

        while let Some(url) = next.take() {
            if page > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            page += 1;

            if self.debug {
                log::info!("📡 {} HTTP Request URL (page {}): {}", category, page, url);
            } else {
                log::debug!("📡 {} HTTP Request URL (page {}): {}", category, page, url);
            }

            let response = self.transport.get(&url, self.token.as_deref()).await?;

            if !response.is_success() {
                log::error!("{} request failed with status {}: {}", category, response.status, url);
                return Err(StatsError::Status {
                    status: response.status,
                    url,
                });
            }

            let items = source
                .decode_page(category, &response.body)
                .map_err(|source| StatsError::Decode {
                    url: url.clone(),
                    source,
                })?;

            log::debug!("📥 Fetched {} {} from page {}", items.len(), category, page);
            all_items.extend(items);

            next = response.link.as_deref().and_then(next_page_url);
        }

        Ok(all_items)
    }
}

/// Extract the `rel="next"` target from a `Link` header.
///
/// The header is a comma-separated list of `<url>; rel="..."` entries.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();

        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });
        if !is_next {
            return None;
        }

        let url = target.strip_prefix('<')?.strip_suffix('>')?.trim();
        (!url.is_empty()).then(|| url.to_string())
    })
}
