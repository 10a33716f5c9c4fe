pub mod categories;
pub mod exchange_rates;
pub mod movies;
