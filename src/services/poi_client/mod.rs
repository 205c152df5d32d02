pub mod poi_category;
pub mod poi_service;
pub mod types;
