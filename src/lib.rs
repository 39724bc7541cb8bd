pub mod cli;
pub mod commands;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;
