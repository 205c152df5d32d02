use tracing::{error, info};
use wayfinder_api::app;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = app::AppConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    info!(
        "Starting app on {}, serving {}...",
        addr,
        config.static_dir.display()
    );

    let app = app::gen_app(config);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server is running on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
