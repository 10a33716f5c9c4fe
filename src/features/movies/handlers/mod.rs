pub mod movie_handler;

pub use movie_handler::{
    __path_create_movie, __path_delete_movie, __path_get_movie, __path_list_movies,
    __path_update_movie, create_movie, delete_movie, get_movie, list_movies, update_movie,
};
