pub mod api;
pub mod config;
pub mod default_colors;
pub mod http;
pub mod pages;
pub mod route;
pub mod traits;
pub mod types;
pub mod ui;
pub mod validation;
