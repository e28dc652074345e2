pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod providers;
pub mod resolver;
pub mod server;
mod utils;

pub use error::ScoutError;
