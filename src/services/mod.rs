pub mod contributor_stats;
pub mod date_filter;
pub mod item_source;
pub mod paginator;
pub mod query_builder;
pub mod transport;

pub use contributor_stats::ContributorStatsService;
pub use item_source::ItemSource;
pub use paginator::Paginator;
pub use query_builder::{EndpointFamily, QueryBuilder};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
