pub mod config;
pub mod http;
pub mod middleware;
pub mod reclaim;
pub mod repositories;
