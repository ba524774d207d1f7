//! AutoJobber server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

mod api;
mod auth;
mod config;
mod db;
mod entity;
mod error;
mod middleware;
mod migration;
mod models;
mod services;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{http::header, web, App, HttpRequest, HttpServer, Result as ActixResult};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::GatewayToken;
use crate::config::Config;
use crate::db::DbPool;
use crate::services::{DigestConfig, ParserClient, Storage};

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir: &PathBuf = req
        .app_data::<web::Data<PathBuf>>()
        .expect("Static dir not configured")
        .get_ref();
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

/// Perform health check (for Docker healthcheck).
async fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and S3 credentials must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  AutoJobber Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL and S3 credentials");
    }

    // Initialize database
    let pool = DbPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    // Run migrations
    migration::Migrator::up(pool.connection(), None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    // Initialize S3 storage
    let storage = Storage::new(&config.s3)
        .await
        .expect("Failed to initialize S3 storage");

    // Resume parser client
    let parser = ParserClient::new(&config.parser_url, config.parser_timeout_secs)
        .expect("Failed to build parser client");
    info!(
        "Resume parser configured at {} (timeout: {}s)",
        config.parser_url, config.parser_timeout_secs
    );

    // Start the digest background tasks
    let digest_config = DigestConfig {
        webhook_url: config.notify_webhook_url.clone(),
        // Short intervals in development so digests are observable
        daily_interval_secs: if config.is_development() { 60 } else { 86_400 },
        weekly_interval_secs: if config.is_development() { 300 } else { 604_800 },
    };
    services::start_digest_tasks(Arc::new(pool.clone()), digest_config);

    // Prepare shared state
    let bind_address = config.bind_address();
    let gateway_token = GatewayToken::new(config.gateway_token.clone());
    let max_resume_size = config.max_resume_size;
    let min_ratings_for_top = config.min_ratings_for_top;
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    info!(
        "Resume upload limit: {}MB; top-company threshold: {} ratings",
        max_resume_size / 1024 / 1024,
        min_ratings_for_top
    );

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if is_development {
            // Permissive CORS for development
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                    "X-User-Id".parse().unwrap(),
                    "X-Gateway-Token".parse().unwrap(),
                ])
                .max_age(3600)
        } else {
            // Restrictive CORS for production (same-origin only)
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                    "X-User-Id".parse().unwrap(),
                    "X-Gateway-Token".parse().unwrap(),
                ])
                .max_age(3600)
        };

        let mut app = App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(middleware::RequestLogger)
            // Add shared state
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(parser.clone()))
            .app_data(web::Data::new(gateway_token.clone()))
            .app_data(web::Data::new(max_resume_size))
            .app_data(web::Data::new(min_ratings_for_top))
            // Allow 2x the resume limit at the HTTP layer for multipart
            // framing overhead - the streaming code enforces the real limit
            .app_data(web::PayloadConfig::new(max_resume_size * 2))
            // Configure API routes
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_resume_routes)
                    .configure(api::configure_preference_routes)
                    .configure(api::configure_application_routes)
                    .configure(api::configure_rating_routes),
            );

        // Serve Swagger UI in development
        if is_development {
            app = app.service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
            );
        }

        // Serve static files in production (when AJ_STATIC_DIR is set)
        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                // Serve static assets (js, css, images)
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                // Serve favicon
                .service(Files::new("/favicon", dir.clone()).index_file("favicon.ico"))
                // SPA fallback - serve index.html for all other routes
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
