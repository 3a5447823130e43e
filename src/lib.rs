pub mod cli;
pub mod client;
pub mod core;
pub mod error;
pub mod types;
pub mod web;

pub use web::start_web_server;
