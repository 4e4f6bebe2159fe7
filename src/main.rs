use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parcelhub::{
  adapters::http::{
    RequestIdMiddleware, configure_promotion_routes, configure_quote_routes,
    configure_tracking_routes,
  },
  application::promotion::{
    CreatePromotionUseCase, EvaluatePromotionUseCase, ListPromotionsUseCase,
    SetPromotionActiveUseCase,
  },
  application::quote::{ConfirmQuoteUseCase, GetQuoteUseCase, QuoteShipmentUseCase},
  application::tracking::{AdvanceTrackingUseCase, GetTrackingUseCase, StartTrackingUseCase},
  domain::promotion::{PromotionRepository, PromotionService},
  domain::shipping::{QuoteRepository, QuoteService, ReferenceDataRepository},
  domain::tracking::{TrackingRepository, TrackingService},
  infrastructure::{
    config::{Config, DatabaseConfig, StorageBackend},
    persistence::memory::{
      InMemoryPromotionRepository, InMemoryQuoteRepository, InMemoryReferenceData,
      InMemoryTrackingRepository,
    },
    persistence::postgres::{
      PostgresPromotionRepository, PostgresQuoteRepository, PostgresReferenceDataRepository,
      PostgresTrackingRepository,
    },
  },
};

/// Repository set selected by `storage.backend`
struct Repositories {
  reference_data: Arc<dyn ReferenceDataRepository>,
  quotes: Arc<dyn QuoteRepository>,
  promotions: Arc<dyn PromotionRepository>,
  trackings: Arc<dyn TrackingRepository>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "parcelhub=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting ParcelHub application");

  // Load configuration
  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  let pricing = config.pricing.to_settings().map_err(|e| {
    tracing::error!("Invalid pricing configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  let default_stages = config.tracking.stage_names().map_err(|e| {
    tracing::error!("Invalid tracking configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!(
    currency = pricing.currency.as_str(),
    backend = ?config.storage.backend,
    "Configuration loaded successfully"
  );

  let repositories = match config.storage.backend {
    StorageBackend::Postgres => {
      let db_pool = connect_database(&config.database).await?;
      postgres_repositories(db_pool)
    }
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory storage, data will not survive a restart");
      memory_repositories()
    }
  };

  // Initialize domain services
  let promotion_service = Arc::new(PromotionService::new(repositories.promotions));
  let quote_service = Arc::new(QuoteService::new(
    repositories.quotes,
    repositories.reference_data,
    promotion_service.clone(),
    pricing,
  ));
  let tracking_service = Arc::new(TrackingService::new(
    repositories.trackings,
    default_stages,
  ));

  // Initialize quote use cases
  let quote_shipment_use_case = Arc::new(QuoteShipmentUseCase::new(quote_service.clone()));
  let get_quote_use_case = Arc::new(GetQuoteUseCase::new(quote_service.clone()));
  let confirm_quote_use_case = Arc::new(ConfirmQuoteUseCase::new(quote_service));

  // Initialize promotion use cases
  let create_promotion_use_case = Arc::new(CreatePromotionUseCase::new(promotion_service.clone()));
  let list_promotions_use_case = Arc::new(ListPromotionsUseCase::new(promotion_service.clone()));
  let evaluate_promotion_use_case =
    Arc::new(EvaluatePromotionUseCase::new(promotion_service.clone()));
  let set_promotion_active_use_case = Arc::new(SetPromotionActiveUseCase::new(promotion_service));

  // Initialize tracking use cases
  let start_tracking_use_case = Arc::new(StartTrackingUseCase::new(tracking_service.clone()));
  let get_tracking_use_case = Arc::new(GetTrackingUseCase::new(tracking_service.clone()));
  let advance_tracking_use_case = Arc::new(AdvanceTrackingUseCase::new(tracking_service));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .service(web::scope("/api/v1/quotes").configure(|cfg| {
        configure_quote_routes(
          cfg,
          quote_shipment_use_case.clone(),
          get_quote_use_case.clone(),
          confirm_quote_use_case.clone(),
        )
      }))
      .service(web::scope("/api/v1/promotions").configure(|cfg| {
        configure_promotion_routes(
          cfg,
          create_promotion_use_case.clone(),
          list_promotions_use_case.clone(),
          evaluate_promotion_use_case.clone(),
          set_promotion_active_use_case.clone(),
        )
      }))
      .service(web::scope("/api/v1/packages").configure(|cfg| {
        configure_tracking_routes(
          cfg,
          start_tracking_use_case.clone(),
          get_tracking_use_case.clone(),
          advance_tracking_use_case.clone(),
        )
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Connects with a bounded timeout and applies pending migrations.
async fn connect_database(database: &DatabaseConfig) -> std::io::Result<PgPool> {
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(database.max_connections)
      .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
      .connect(&database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  Ok(db_pool)
}

fn postgres_repositories(db_pool: PgPool) -> Repositories {
  Repositories {
    reference_data: Arc::new(PostgresReferenceDataRepository::new(db_pool.clone())),
    quotes: Arc::new(PostgresQuoteRepository::new(db_pool.clone())),
    promotions: Arc::new(PostgresPromotionRepository::new(db_pool.clone())),
    trackings: Arc::new(PostgresTrackingRepository::new(db_pool)),
  }
}

fn memory_repositories() -> Repositories {
  Repositories {
    reference_data: Arc::new(InMemoryReferenceData::default()),
    quotes: Arc::new(InMemoryQuoteRepository::new()),
    promotions: Arc::new(InMemoryPromotionRepository::new()),
    trackings: Arc::new(InMemoryTrackingRepository::new()),
  }
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
