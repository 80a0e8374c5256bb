pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod handlers;
pub mod services;
pub mod store;
pub mod utils;
