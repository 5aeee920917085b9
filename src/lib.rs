pub mod app_state;
pub mod clients;
pub mod config;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod server;
pub mod slug;
