//! Map search session: geocode a query, recentre the map, and overlay the
//! places of interest around the new centre.

pub mod render;
pub mod session;
pub mod sources;
pub mod view_state;
