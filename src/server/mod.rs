pub mod config;
mod http_layers;
mod song_routes;
pub mod server;
pub mod state;
mod upload;

pub use config::ServerConfig;
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::run_server;
