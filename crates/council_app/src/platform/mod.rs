mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;
mod selection;
mod transport;

pub use app::run_app;
