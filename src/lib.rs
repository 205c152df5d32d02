pub mod app;
pub mod map_search;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;
