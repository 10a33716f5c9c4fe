mod movie_dto;

pub use movie_dto::{MovieRequestDto, MovieResponseDto};
