use dotenv::dotenv;
use signage_quote_backend::app::app::App;
use signage_quote_backend::config::{AppConfig, MongoConfig};
use signage_quote_backend::util::logger::Logger;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    // Load before reading any configuration; reported once logging is up
    let dotenv_result = dotenv();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Invalid application configuration: {e}");
            std::process::exit(1);
        }
    };

    let _logger = match Logger::new(&config.log_dir, &config.file_log_level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ Failed to initialize logging: {e}");
            std::process::exit(1);
        }
    };

    info!("🚀 Starting Signage Quote Backend");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }
    debug!(?config, "Application configuration loaded");

    let mongo_config = match MongoConfig::from_env_optional() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid MongoDB configuration: {e}");
            std::process::exit(1);
        }
    };

    let app = match App::new(config, mongo_config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to build application: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}
