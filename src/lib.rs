pub mod api;
pub mod config;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod section;
pub mod views;
