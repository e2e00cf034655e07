pub mod builder;
pub mod chrome;
pub mod form;
pub mod header;
pub mod nav_bar;
pub mod orders;
pub mod status_bar;
