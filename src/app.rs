use std::{env, path::PathBuf, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use tracing::warn;

use crate::{
    routes::{apply_routes, get_static::get_static},
    services::{
        geocoding_client::geocoding_service::{GeocodingService, GeocodingServiceConfig},
        poi_client::poi_service::{PoiService, PoiServiceConfig},
    },
    types::app_state::AppState,
};

pub const DEFAULT_PORT: u16 = 10000;

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub nominatim_host: String,
    pub overpass_host: String,
    pub static_dir: PathBuf,
    pub user_agent: String,
    pub upstream_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            nominatim_host: "https://nominatim.openstreetmap.org".to_string(),
            overpass_host: "https://overpass-api.de".to_string(),
            static_dir: PathBuf::from("build"),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            upstream_timeout: Duration::from_secs(15),
        }
    }
}

impl AppConfig {
    /// Production defaults, with the listening port taken from `PORT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid PORT {:?}, using {}", port, config.port),
            }
        }

        config
    }
}

pub fn gen_app(config: AppConfig) -> Router {
    let cors_middleware = CorsLayer::new();
    let state = AppState {
        geocoding_service: GeocodingService::new(GeocodingServiceConfig {
            host: config.nominatim_host,
            user_agent: config.user_agent.clone(),
            timeout: config.upstream_timeout,
        }),
        poi_service: PoiService::new(PoiServiceConfig {
            host: config.overpass_host,
            user_agent: config.user_agent,
            timeout: config.upstream_timeout,
        }),
        static_dir: Arc::new(config.static_dir),
    };

    apply_routes(Router::new())
        .fallback(get(get_static))
        .layer(CompressionLayer::new())
        .layer(cors_middleware)
        .with_state(state)
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub nominatim_server: mockito::ServerGuard,
    pub overpass_server: mockito::ServerGuard,
    pub static_dir: PathBuf,
}

/// Builds an app whose upstreams are mockito servers and whose bundle lives
/// in a fresh temporary directory named after `name`.
#[cfg(test)]
pub async fn gen_mock_app(name: &str) -> MockApp {
    let nominatim_server = mockito::Server::new_async().await;
    let overpass_server = mockito::Server::new_async().await;

    let static_dir = env::temp_dir().join(format!("wayfinder-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&static_dir);
    std::fs::create_dir_all(&static_dir).unwrap();

    let app = gen_app(AppConfig {
        nominatim_host: nominatim_server.url(),
        overpass_host: overpass_server.url(),
        static_dir: static_dir.clone(),
        upstream_timeout: Duration::from_secs(5),
        ..Default::default()
    });

    MockApp {
        app,
        nominatim_server,
        overpass_server,
        static_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();

        assert_eq!(config.port, 10000);
        assert_eq!(config.static_dir, PathBuf::from("build"));
        assert!(config.user_agent.starts_with("wayfinder-api/"));
    }
}
