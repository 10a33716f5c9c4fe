//! Movie catalog. Every read carries `priceConverted`, the USD price
//! multiplied by the cached exchange rate; every write is appended to the
//! activity log.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/movies` | No | List movies |
//! | GET | `/api/movies/{id}` | No | Get one movie |
//! | POST | `/api/movies` | No | Create a movie |
//! | PUT | `/api/movies/{id}` | No | Replace a movie |
//! | DELETE | `/api/movies/{id}` | No | Delete a movie |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MovieService;
