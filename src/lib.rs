pub mod actions;
pub mod clients;
pub mod config;
pub mod handler;
pub mod models;
pub mod response;
pub mod routes;
pub mod schema;
pub mod utils;
