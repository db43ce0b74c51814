pub mod client;
pub mod config;
pub mod console;
pub mod model;
pub mod routes;
pub mod state;
pub mod view;
