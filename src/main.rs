use std::panic;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use shop_inventory::config::Config;
use shop_inventory::db::dbshop::DbShop;
use shop_inventory::docs::ApiDoc;
use shop_inventory::routes::{create_api_routes, create_web_routes};
use shop_inventory::services::item_service::ItemService;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "shop_inventory=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    // The whole application is CRUD over the item store, so a database is
    // required rather than optional
    let Some(db_url) = config.db_url.as_deref() else {
        error!("No database URL configured - set DB_URL");
        std::process::exit(1);
    };

    let store = match DbShop::connect(db_url).await {
        Ok(store) => {
            info!("Database initialized successfully");
            store
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(ItemService::new(Arc::new(store)));

    // Combine all routes
    let app_routes = Router::new()
        // HTML pages at the root
        .merge(create_web_routes(service.clone()))
        // Mount API routes
        .nest("/api", create_api_routes(service))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add tracing layer
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    info!(
        "📚 Swagger UI available at http://{}/swagger",
        config.server_address()
    );

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
