pub mod cache;
pub mod crawl;
pub mod dates;
pub mod extract;
pub mod fetch;
pub mod transport;
pub mod weeks;
