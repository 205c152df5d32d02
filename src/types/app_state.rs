use std::{path::PathBuf, sync::Arc};

use crate::services::{
    geocoding_client::geocoding_service::GeocodingService, poi_client::poi_service::PoiService,
};

#[derive(Clone)]
pub struct AppState {
    pub geocoding_service: GeocodingService,
    pub poi_service: PoiService,
    pub static_dir: Arc<PathBuf>,
}
