/// OpenMusic Server - playlist collaboration backend
use clap::{Parser, Subcommand};
use openmusic_core::CreateUser;
use openmusic_server::{
    config::ServerConfig,
    create_router,
    jobs::{ExportJobQueue, ExportWorker},
    services::accounts,
    state::AppState,
    AlbumLikes, AuthService,
};
use openmusic_storage::SqliteStorage;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openmusic-server")]
#[command(about = "OpenMusic playlist collaboration server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Full name
        #[arg(short, long)]
        fullname: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "openmusic_server=info,openmusic_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            password,
            fullname,
        } => {
            add_user(
                config,
                CreateUser {
                    username,
                    password,
                    fullname,
                },
            )
            .await?;
        }
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<Arc<SqliteStorage>> {
    let pool = openmusic_storage::create_pool(&config.storage.database_url).await?;
    openmusic_storage::run_migrations(&pool).await?;
    Ok(Arc::new(SqliteStorage::new(pool)))
}

fn auth_service(config: &ServerConfig) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting OpenMusic Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let storage = open_storage(&config).await?;
    tracing::info!("Database connected");

    let likes = AlbumLikes::new(
        storage.clone(),
        config.cache.likes_capacity,
        Duration::from_secs(config.cache.likes_ttl_secs),
    );
    let (export_queue, export_receiver) = ExportJobQueue::channel();

    let app_state = AppState::new(
        storage.clone(),
        auth_service(&config),
        Arc::new(export_queue),
        likes,
    );
    ExportWorker::new(
        storage,
        app_state.memberships.clone(),
        config.exports.outbox_dir.clone(),
    )
    .spawn(export_receiver);

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: ServerConfig, user: CreateUser) -> anyhow::Result<()> {
    let storage = open_storage(&config).await?;
    let auth = auth_service(&config);

    let username = user.username.clone();
    let user_id = accounts::register(&storage, &auth, user).await?;

    println!("Created user {username} ({user_id})");

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let storage = open_storage(&config).await?;
    let users = storage.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.username, user.fullname);
    }

    Ok(())
}
