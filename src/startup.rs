//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{AuthService, AuthServiceImpl, ContentService, NotificationService};
use crate::config::{Settings, StorageBackend};
use crate::domain::{Blog, Feature, ServiceOffering, TeamMember, Testimonial};
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::infrastructure::storage::UploadStore;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{
    create_cors_layer, create_security_headers_layer, create_trace_layer, RateLimiter,
};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub auth: Arc<dyn AuthService>,
    pub uploads: Arc<UploadStore>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub rate_limiter: Arc<RateLimiter>,
    pub settings: Arc<Settings>,
    /// Connection pool, when the postgres backend is in use
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(settings: Settings, repos: Repositories, db: Option<PgPool>) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id as u64,
            settings.snowflake.epoch,
        ));

        let auth: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
            repos.users.clone(),
            snowflake.clone(),
            settings.jwt.clone(),
            settings.auth.allow_registration,
        ));

        Self {
            auth,
            uploads: Arc::new(UploadStore::new(&settings.uploads)),
            rate_limiter: Arc::new(RateLimiter::new(&settings.rate_limit)),
            snowflake,
            repos,
            settings: Arc::new(settings),
            db,
        }
    }

    pub fn blogs(&self) -> ContentService<Blog> {
        ContentService::new(self.repos.blogs.clone(), self.snowflake.clone())
    }

    pub fn features(&self) -> ContentService<Feature> {
        ContentService::new(self.repos.features.clone(), self.snowflake.clone())
    }

    pub fn services(&self) -> ContentService<ServiceOffering> {
        ContentService::new(self.repos.services.clone(), self.snowflake.clone())
    }

    pub fn team(&self) -> ContentService<TeamMember> {
        ContentService::new(self.repos.team.clone(), self.snowflake.clone())
    }

    pub fn testimonials(&self) -> ContentService<Testimonial> {
        ContentService::new(self.repos.testimonials.clone(), self.snowflake.clone())
    }

    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(self.repos.notifications.clone(), self.snowflake.clone())
    }
}

/// Build the full router, with tracing, CORS and security headers around
/// every route. The security headers are outermost so CORS preflight
/// answers carry them too.
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);
    let security = create_security_headers_layer(&state.settings.environment);

    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(create_trace_layer())
        .layer(cors)
        .layer(security)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let (repos, db) = match settings.database.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                tracing::info!("Database connection pool created");

                database::run_migrations(&pool)
                    .await
                    .context("Failed to run migrations")?;
                tracing::info!("Database migrations applied");

                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory document store; data is lost on restart");
                (Repositories::in_memory(), None)
            }
        };

        let state = AppState::new(settings, repos, db);

        state
            .uploads
            .ensure_dir()
            .await
            .with_context(|| format!("Failed to create {}", state.uploads.dir().display()))?;

        if let Some(admin) = &state.settings.admin {
            let created = state
                .auth
                .ensure_admin(admin)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed admin account: {}", e))?;
            if !created {
                tracing::debug!(email = %admin.email, "Admin account already exists");
            }
        }

        health::init_server_start();

        let addr = state.settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self {
            listener,
            router: build_router(state),
        })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down...");
}
