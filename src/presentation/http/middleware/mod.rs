pub mod error_page;
pub mod rate_limit;
