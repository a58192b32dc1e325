//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use jobboard_server::db::{create_pool_with_options, migrations, PgStore, DEFAULT_MAX_CONNECTIONS};
use jobboard_server::http::{run_server, ServerConfig};
use jobboard_server::store::{MemoryStore, Store};
use jobboard_server::{AppConfig, AppState, IdentityConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:4000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep all data in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Skip schema migrations at start-up
    #[arg(long)]
    pub skip_migrations: bool,

    /// Firebase project whose ID tokens are accepted
    #[arg(long, env = "FIREBASE_PROJECT_ID")]
    pub firebase_project_id: Option<String>,

    /// Shared secret for HS256 tokens, used when no Firebase project is set
    #[arg(long, env = "AUTH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Require sign-in for application status updates and deletes
    #[arg(long, env = "GATE_APPLICATION_MUTATIONS")]
    pub gate_application_mutations: bool,
}

async fn open_store(args: &ServeArgs) -> Result<Arc<dyn Store>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env or .env, or pass --in-memory")?;

    let pool = create_pool_with_options(database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if !args.skip_migrations {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    Ok(Arc::new(PgStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = open_store(&args).await?;

    let identity = IdentityConfig::select(args.firebase_project_id, args.jwt_secret);
    let config = AppConfig {
        identity,
        gate_application_mutations: args.gate_application_mutations,
    };
    tracing::info!(
        identity = config.identity.kind(),
        gate_application_mutations = config.gate_application_mutations,
        "Starting jobboard server on {}",
        args.bind
    );

    let state = AppState::from_config(store, config);
    let server = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(state, server).await.context("Server error")?;

    Ok(())
}
