pub mod account_client;
pub mod catalog_client;
mod http;
pub mod models;
pub mod order_repo;
