use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uc_deck_gateway::api::routes::deck::FindDeckResponse;
use uc_deck_gateway::api::state::AppState;
use uc_deck_gateway::config::{AppConfig, MAX_TOP_PLAYERS};
use uc_deck_gateway::enrich;
use uc_deck_gateway::rankings::{HttpRankingsClient, RankingsClient};
use uc_deck_gateway::resolver::{resolve_location, BattleCriteria, DeckQuery, DeckResolver};

#[derive(Parser)]
#[command(name = "uc-deck-gateway")]
#[command(about = "Clash Royale top-player and Ultimate Champion deck gateway")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up a deck once and print the response body
    FindDeck {
        /// Target trophy count
        #[arg(long)]
        medals: i64,

        /// Region key (europe, north-america, asia, south-america)
        #[arg(long)]
        region: Option<String>,
    },

    /// List top players once and print the response body
    TopPlayers {
        /// Region key (europe, north-america, asia, south-america)
        #[arg(long)]
        region: Option<String>,

        /// Number of players
        #[arg(long)]
        limit: Option<u32>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(Some(&cli.config)) {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not up yet; the configured level is unknown
            init_tracing(cli.log_level.as_deref().unwrap_or("info"), cli.json_logs);
            tracing::error!("Configuration error: {}", e);
            return Err(e).context("refusing to start without a valid configuration");
        }
    };

    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting uc-deck-gateway v{}", env!("CARGO_PKG_VERSION"));

    let client: Arc<dyn RankingsClient> = Arc::new(
        HttpRankingsClient::new(&config.rankings).context("failed to build ranking API client")?,
    );
    tracing::info!(
        "Ranking API client: {} at {}",
        client.name(),
        config.rankings.base_url
    );

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState::new(client, &config)?;
            let app = uc_deck_gateway::api::build_router(state);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            tracing::info!(
                "Listening on http://{} (rate limit {} per {})",
                addr,
                config.rate_limit.max_requests,
                config.rate_limit.window
            );
            axum::serve(listener, app).await?;
        }
        Commands::FindDeck { medals, region } => {
            let resolver = DeckResolver::new(client, BattleCriteria::from_config(&config.deck));
            let resolved = resolver.resolve(&DeckQuery { medals, region }).await?;
            let body = FindDeckResponse::from(resolved);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::TopPlayers { region, limit } => {
            let max = config.deck.top_players.clamp(1, MAX_TOP_PLAYERS);
            let limit = limit.unwrap_or(max).clamp(1, max);
            let location = resolve_location(client.as_ref(), region.as_deref()).await;
            let players = enrich::top_players(
                client.as_ref(),
                &location,
                limit,
                config.deck.enrich_concurrency,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&players)?);
        }
    }

    Ok(())
}
