mod config;
mod data;
mod schema;
mod server;

pub use config::Config;
pub use data::DataConfig;
pub use schema::{ColumnRule, MatchMode, SchemaConfig};
pub use server::ServerConfig;
