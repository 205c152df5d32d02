use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

/// A node, way or relation. Nodes carry `lat`/`lon`; ways and relations
/// only carry `center` when the query asked for `out center`.
#[derive(Deserialize, Serialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Deserialize, Serialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}
