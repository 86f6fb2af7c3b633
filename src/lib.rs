pub mod cli;
pub mod config;
pub mod data;
pub mod gallery;
pub mod logging;
pub mod server;
pub mod totals;
