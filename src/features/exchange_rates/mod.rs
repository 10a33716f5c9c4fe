//! USD exchange rate cache used to display movie prices in the target
//! currency.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/exchange-rates` | No | Current USD rate (cached or refreshed) |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use clients::{FixedRateSource, RateSource};
pub use services::RateCache;
