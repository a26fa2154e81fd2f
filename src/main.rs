use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelter_backend::{
    build_router,
    config::{self, Config},
    database::{init_db, run_migrations},
    handlers::auth::hash,
    repositories::user as users,
    state::AppState,
    storage::init_storage,
};

#[derive(Parser, Debug)]
#[command(name = "shelter-backend")]
#[command(about = "Content API for the cow shelter website")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create an admin account, or promote and reset an existing one
    CreateAdmin {
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads `env = ...` arguments
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelter_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Migrate => migrate().await,
        Command::CreateAdmin { email, password } => create_admin(email, password).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let storage = init_storage(&config.storage)
        .await
        .context("Failed to initialize object storage")?;
    info!(kind = %storage.kind(), bucket = %config.storage.bucket, "Object storage ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(AppState::new(pool, storage, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let database = config::database_from_env().context("Failed to load database configuration")?;
    let pool = init_db(&database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}

async fn create_admin(email: String, password: String) -> anyhow::Result<()> {
    anyhow::ensure!(password.len() >= 8, "password must be at least 8 characters");

    let database = config::database_from_env().context("Failed to load database configuration")?;
    let pool = init_db(&database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let password_hash = hash(password).await?;
    let user = users::upsert_admin(&pool, &email.trim().to_lowercase(), &password_hash).await?;

    info!(id = user.id, email = %user.email, "Admin account ready");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
