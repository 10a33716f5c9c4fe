/// Currency every stored price is expressed in
pub const SOURCE_CURRENCY: &str = "USD";

/// Default currency prices are displayed in
pub const DEFAULT_TARGET_CURRENCY: &str = "COP";

/// Colombian pesos per US dollar, used by the fixed rate source and as fallback
pub const DEFAULT_COP_PER_USD: i64 = 3683;

/// Default location of the movie activity log
pub const DEFAULT_ACTIVITY_LOG_PATH: &str = "Logs/movies.log";
