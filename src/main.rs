use actix_web::{App, HttpServer, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::{
  adapters::http::{
    AccessLogMiddleware, configure_account_routes, configure_content_routes, health_handler,
  },
  application::{AccountService, ContentService},
  domain::account::TokenService,
  infrastructure::{
    config::Config,
    persistence::postgres::{PgAccountRepository, PgContentRepository},
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "inkpress=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting inkpress");

  // Load configuration
  let config = Config::load()
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?".to_string(),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| std::io::Error::other(format!("Migration error: {}", e)))?;
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let content_repo = Arc::new(PgContentRepository::new(db_pool.clone()));
  let account_repo = Arc::new(PgAccountRepository::new(db_pool.clone()));

  // Initialize security services: the signing secret and the hasher are
  // constructed once here and injected everywhere they are needed
  let password_hasher = Arc::new(
    Argon2PasswordHasher::new()
      .map_err(|e| std::io::Error::other(format!("Hasher init error: {}", e)))?,
  );
  let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
    &config.security.jwt_secret,
    config.security.token_ttl_seconds,
  ));

  // Initialize use-case services with the per-operation deadline
  let operation_timeout = Duration::from_secs(config.security.operation_timeout_seconds);
  let content_service = Arc::new(ContentService::new(content_repo, operation_timeout));
  let account_service = Arc::new(AccountService::new(
    account_repo,
    password_hasher,
    token_service.clone(),
    operation_timeout,
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let shutdown_grace = config.server.shutdown_grace_seconds;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let content_service = content_service.clone();
    let account_service = account_service.clone();
    let token_service = token_service.clone();

    App::new()
      .wrap(AccessLogMiddleware::new())
      .route("/", web::get().to(health_handler))
      .service(web::scope("/content").configure(|cfg| {
        configure_content_routes(cfg, content_service.clone(), token_service.clone());
      }))
      .service(web::scope("/account").configure(|cfg| {
        configure_account_routes(cfg, account_service.clone(), token_service.clone());
      }))
  })
  // Stop accepting, drain in-flight requests up to the grace period,
  // then force-terminate whatever remains
  .shutdown_timeout(shutdown_grace)
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
