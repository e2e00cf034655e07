pub mod api;
pub mod loader;
