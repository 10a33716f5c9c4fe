mod rate_source;

pub use rate_source::{FixedRateSource, RateSource, RateSourceError};
