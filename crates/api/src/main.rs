use std::net::SocketAddr;
use std::sync::Arc;

use influx_core::roles::ROLE_SUPER_ADMIN;
use influx_db::models::user::CreateUser;
use influx_db::repositories::UserRepo;
use influx_db::DbPool;
use influx_notify::{EmailConfig, HttpSmsGateway, SmsConfig, SmtpNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use influx_api::auth::password::hash_password;
use influx_api::config::{SeedAdmin, ServerConfig};
use influx_api::router::build_app_router;
use influx_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "influx_api=debug,influx_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = influx_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    influx_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    influx_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if let Some(seed) = SeedAdmin::from_env() {
        seed_super_admin(&pool, &seed).await;
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    // --- Outbound channels ---
    let notifier = SmtpNotifier::new(EmailConfig::from_env()).expect("Invalid SMTP configuration");
    let sms = HttpSmsGateway::new(SmsConfig::from_env()).expect("Invalid SMS configuration");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier: Arc::new(notifier),
        sms: Arc::new(sms),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the configured super admin unless a user with that email exists.
async fn seed_super_admin(pool: &DbPool, seed: &SeedAdmin) {
    match UserRepo::find_by_email(pool, &seed.email).await {
        Ok(Some(_)) => {
            tracing::debug!(email = %seed.email, "Seed admin already present");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up seed admin");
            return;
        }
    }

    let password_hash = hash_password(&seed.password).expect("Failed to hash seed admin password");
    let username = seed
        .email
        .split('@')
        .next()
        .unwrap_or(&seed.email)
        .to_string();
    let input = CreateUser {
        name: "Super Admin".into(),
        email: seed.email.clone(),
        username,
        password_hash,
        role: ROLE_SUPER_ADMIN.into(),
        mobile: None,
    };

    match UserRepo::create(pool, &input).await {
        Ok(user) => tracing::info!(user_id = user.id, "Seeded super admin"),
        Err(e) => tracing::error!(error = %e, "Failed to seed super admin"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
