pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod media;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod storage;
pub mod utils;

pub use routes::build_router;
