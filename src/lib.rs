pub mod api_connection;
pub mod cli;
pub mod config;
pub mod handler;
pub mod nutrition;
pub mod profile;
pub mod recommendation;
