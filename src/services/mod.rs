//! Core services for market analysis and caching

pub mod analysis;
pub mod cache;
pub mod signals;

pub use analysis::AnalysisService;
pub use cache::Cache;
