mod movie;

pub use movie::{Movie, MovieInput, MovieStatus};
