/// Notes Server - Multi-user personal notes server
use clap::{Parser, Subcommand};
use notes_core::validation::RegistrationForm;
use notes_server::{api, config::ServerConfig, services::AuthService, state::AppState};
use notes_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notes-server")]
#[command(about = "Multi-user personal notes server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "NOTES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Register a new user
    AddUser {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser { email, password } => {
            add_user(config, email, password).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

/// Open the database and wire services together
async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let db = Database::connect(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::from_settings(&config.auth));

    Ok(AppState::new(Arc::new(db), auth_service))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Notes Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = build_state(&config).await?;
    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn add_user(config: ServerConfig, email: String, password: String) -> anyhow::Result<()> {
    let app_state = build_state(&config).await?;

    let user = app_state
        .accounts
        .register(RegistrationForm { email, password })
        .await?;

    println!("Created user {} ({})", user.email, user.id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let app_state = build_state(&config).await?;

    let users = app_state.accounts.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.email);
    }

    Ok(())
}
