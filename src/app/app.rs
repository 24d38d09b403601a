use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
};
use tracing::{info, warn};

use crate::config::{AppConfig, MongoConfig};
use crate::middlewares::request_logger::log_api_requests;
use crate::repository::mongo_quote_repo::MongoQuoteRepository;
use crate::repository::quote_repo::{InMemoryQuoteRepository, QuoteRepository};
use crate::router::quote_router::quote_router;
use crate::service::quote_service::QuoteServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
}

impl App {
    /// Wires the quote store selected by configuration into the router.
    pub async fn new(config: AppConfig, mongo_config: Option<MongoConfig>) -> Result<Self, Box<dyn std::error::Error>> {
        let quote_repo: Arc<dyn QuoteRepository> = match mongo_config {
            Some(mongo_config) => {
                info!("Using MongoDB quote store");
                Arc::new(MongoQuoteRepository::new(&mongo_config).await?)
            }
            None => {
                warn!("Using in-memory quote store, submissions are lost on restart");
                Arc::new(InMemoryQuoteRepository::new())
            }
        };
        let quote_service = Arc::new(QuoteServiceImpl::new(quote_repo));
        Ok(Self::with_service(config, quote_service))
    }

    pub fn with_service(config: AppConfig, quote_service: Arc<QuoteServiceImpl>) -> Self {
        let router = Self::build_router(&config, quote_service.clone());
        App { config, router, quote_service }
    }

    pub fn build_router(config: &AppConfig, quote_service: Arc<QuoteServiceImpl>) -> Router {
        let mut router = Router::new()
            .merge(quote_router(quote_service))
            .route("/health", get(|| async { "OK" }));

        if let Some(ref dir) = config.static_dir {
            info!("Serving static assets from {}", dir);
            router = router.fallback_service(ServeDir::new(dir));
        }

        router = router.layer(middleware::from_fn(log_api_requests));

        if let Some(ref origin) = config.cors_allowed_origin {
            info!("Allowing cross-origin requests from {}", origin);
            let allowed = origin.clone();
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                    origin.as_bytes() == allowed.as_bytes()
                }));
            router = router.layer(cors);
        }
        router
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the configured address, falling back to an OS-assigned port when
    /// the configured one is taken.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        let ip = self.config.host.parse::<std::net::IpAddr>().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid host {}: {}", self.config.host, e))
        })?;
        let addr = SocketAddr::new(ip, self.config.port);
        match TcpListener::bind(addr).await {
            Ok(listener) => Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                warn!("Port {} is in use, trying another port", self.config.port);
                TcpListener::bind(SocketAddr::new(ip, 0)).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = self.bind().await?;
        info!("🚀 Server running at http://{}", listener.local_addr()?);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
