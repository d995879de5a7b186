pub mod config;
mod http_layers;
pub mod metrics;
mod recommend_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use recommend_routes::make_recommend_routes;
pub use server::run_server;
