pub mod activity_log;
pub mod catalog_store;
