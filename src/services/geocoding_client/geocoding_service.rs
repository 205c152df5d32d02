use std::time::Duration;

use tracing::warn;
use urlencoding::encode;

use super::types::{
    geocoding_service_error::GeocodingServiceError,
    nominatim_search_response::NominatimSearchResult,
};
use crate::types::search_result::SearchResult;

#[derive(Clone)]
pub struct GeocodingServiceConfig {
    pub host: String,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeocodingService {
    config: GeocodingServiceConfig,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(config: GeocodingServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Forward geocode a free-text query. Results keep the geocoder's order,
    /// so the first entry is its best match.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, GeocodingServiceError> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.config.host,
            encode(query)
        );

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| GeocodingServiceError::Request(format!("Failed to send request: {}", e)))?;

        if !resp.status().is_success() {
            return Err(GeocodingServiceError::Status(resp.status().as_u16()));
        }

        let rows = resp.json::<Vec<serde_json::Value>>().await.map_err(|e| {
            GeocodingServiceError::Parse(format!("Failed to get response body: {}", e))
        })?;

        Ok(rows.into_iter().filter_map(parse_row).collect())
    }
}

fn parse_row(raw: serde_json::Value) -> Option<SearchResult> {
    let row = match serde_json::from_value::<NominatimSearchResult>(raw.clone()) {
        Ok(row) => row,
        Err(e) => {
            warn!("Skipping malformed geocoding row: {}", e);
            return None;
        }
    };

    match (row.lat.to_f64(), row.lon.to_f64()) {
        (Some(lat), Some(lon)) => Some(SearchResult {
            lat,
            lon,
            display_name: row.display_name,
            raw_address: raw,
        }),
        _ => {
            warn!(
                "Skipping geocoding row with invalid coordinates: {}",
                row.display_name
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn service(host: String) -> GeocodingService {
        GeocodingService::new(GeocodingServiceConfig {
            host,
            user_agent: "wayfinder-test".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn test_search_parses_rows_in_order() {
        let mut server = mockito::Server::new_async().await;

        let body = json!([
            {
                "place_id": 1,
                "lat": "27.1751448",
                "lon": "78.0421422",
                "display_name": "Taj Mahal, Agra, Uttar Pradesh, India",
                "type": "attraction"
            },
            {
                "lat": "27.17",
                "lon": "78.04",
                "display_name": "Taj Mahal Road, Agra, India"
            }
        ]);

        let mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("format".into(), "json".into()),
                mockito::Matcher::UrlEncoded("q".into(), "Taj Mahal, India".into()),
            ]))
            .match_header("user-agent", "wayfinder-test")
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let results = service(server.url()).search("Taj Mahal, India").await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert!((results[0].lat - 27.1751).abs() < 1e-3);
        assert!((results[0].lon - 78.0421).abs() < 1e-3);
        assert_eq!(
            results[0].display_name,
            "Taj Mahal, Agra, Uttar Pradesh, India"
        );
        assert_eq!(results[0].raw_address["type"], "attraction");
        assert_eq!(results[1].display_name, "Taj Mahal Road, Agra, India");
    }

    #[tokio::test]
    async fn test_search_skips_rows_with_bad_coordinates() {
        let mut server = mockito::Server::new_async().await;

        let body = json!([
            { "lat": "not a number", "lon": "1.0", "display_name": "Broken" },
            { "lon": "1.0", "display_name": "Missing lat" },
            { "lat": "1.5", "lon": "2.5", "display_name": "Fine" }
        ]);

        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_body(body.to_string())
            .create_async()
            .await;

        let results = service(server.url()).search("anything").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Fine");
    }

    #[tokio::test]
    async fn test_search_accepts_numeric_coordinates() {
        let mut server = mockito::Server::new_async().await;

        let body = json!([
            { "lat": 27.1751, "lon": 78.0421, "display_name": "Taj Mahal" },
            { "lat": "27.1795", "lon": 78.0211, "display_name": "Agra Fort" }
        ]);

        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_body(body.to_string())
            .create_async()
            .await;

        let results = service(server.url())
            .search("Taj Mahal, India")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!((results[0].lat, results[0].lon), (27.1751, 78.0421));
        assert_eq!(results[0].raw_address["lat"], 27.1751);
        assert_eq!((results[1].lat, results[1].lon), (27.1795, 78.0211));
    }

    #[tokio::test]
    async fn test_search_empty_array() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_body("[]")
            .create_async()
            .await;

        let results = service(server.url()).search("nowhere").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_upstream_error_status() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = service(server.url()).search("anything").await.unwrap_err();

        assert!(matches!(err, GeocodingServiceError::Status(503)));
    }

    #[tokio::test]
    async fn test_search_invalid_body() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let err = service(server.url()).search("anything").await.unwrap_err();

        assert!(matches!(err, GeocodingServiceError::Parse(_)));
    }
}
