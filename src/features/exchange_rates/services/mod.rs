mod rate_cache;

pub use rate_cache::RateCache;
