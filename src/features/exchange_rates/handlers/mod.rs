pub mod exchange_rate_handler;

pub use exchange_rate_handler::{__path_get_exchange_rate, get_exchange_rate};
