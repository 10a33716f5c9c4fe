mod exchange_rate_dto;

pub use exchange_rate_dto::ExchangeRateResponseDto;
