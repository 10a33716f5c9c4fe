//! Movie categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories |
//! | GET | `/api/categories/{id}` | No | Get one category |
//! | POST | `/api/categories` | No | Create a category |
//! | PUT | `/api/categories/{id}` | No | Replace a category |
//! | DELETE | `/api/categories/{id}` | No | Delete a category no movie references |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
