mod api;
mod config;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use api::{api_router, ApiState};
use config::CredoConfig;
use credo_core::Platform;
use credo_score::{MockEnricher, Rng};
use credo_store::{MemStore, RecordStore, SqliteStore};

#[derive(Parser)]
#[command(name = "credo")]
#[command(about = "Score social accounts for credibility and compare them for coordination")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[arg(short = 'f', long, help = "Path to config file")]
        config: Option<String>,
        #[arg(short, long, help = "Override the configured port")]
        port: Option<u16>,
        #[arg(long, help = "Override the configured bind address")]
        bind: Option<String>,
    },
    Verify {
        #[arg(help = "Handle or profile URL to score")]
        handle: String,
        #[arg(short = 'P', long, default_value = "twitter")]
        platform: String,
    },
    Compare {
        #[arg(help = "Two or more handles to score and compare")]
        handles: Vec<String>,
        #[arg(short = 'P', long, default_value = "twitter")]
        platform: String,
    },
}

fn parse_platform(s: &str) -> Result<Platform, Box<dyn std::error::Error>> {
    Platform::parse(s).ok_or_else(|| {
        format!("unknown platform: {s}. use twitter, instagram, facebook, or tiktok").into()
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, port, bind } => run_serve(config, port, bind).await,
        Commands::Verify { handle, platform } => run_verify(handle, platform),
        Commands::Compare { handles, platform } => run_compare(handles, platform),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run_serve(
    config_path: Option<String>,
    port: Option<u16>,
    bind: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => CredoConfig::from_file(&path)
            .map_err(|e| format!("failed to load config {}: {}", path, e))?,
        None => CredoConfig::default(),
    };

    let bind = bind.unwrap_or(config.server.bind);
    let port = port.unwrap_or(config.server.port);

    let store: Arc<dyn RecordStore> = match config.store.backend.as_str() {
        "memory" => Arc::new(MemStore::new()),
        "sqlite" => {
            if let Some(parent) = std::path::Path::new(&config.store.path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let store = SqliteStore::open(&config.store.path)?;
            info!(path = %config.store.path, "sqlite store opened");
            Arc::new(store)
        }
        other => {
            return Err(format!("unknown store backend: {other}. use memory or sqlite").into());
        }
    };

    let state = Arc::new(ApiState {
        store,
        enricher: Arc::new(MockEnricher),
    });
    let router = api_router(state);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("credo listening on {}", addr);
    println!("endpoints:");
    println!("  POST /api/verify   - score a handle");
    println!("  POST /api/compare  - compare verified accounts");
    println!("  POST /api/report   - report an account");
    println!("  GET  /api/history  - recent verifications");
    println!("  GET  /health       - health check");

    axum::serve(listener, router).await?;

    Ok(())
}

fn run_verify(handle: String, platform: String) -> Result<(), Box<dyn std::error::Error>> {
    let platform = parse_platform(&platform)?;

    let store = MemStore::new();
    let mut rng = Rng::from_entropy();
    let record = credo_score::verify(&store, &handle, platform, &MockEnricher, &mut rng)?;
    let report = &record.report;

    println!("\n--- verification report for {} ---", report.account_handle);
    println!("platform: {}", report.platform_name);
    println!("account id: {}", report.account_id);
    println!("credibility score: {}/100", report.credibility_score);
    println!("human likelihood: {}%", report.human_likelihood);
    println!("verified: {}", report.is_verified);
    println!(
        "followers: {}  following: {}",
        report.followers_count, report.following_count
    );
    println!("created: {}", report.account_creation_date);

    println!("\nfactors:");
    for factor in &report.score_factors {
        println!("  [{:>2}] {}: {}", factor.score, factor.name, factor.description);
    }

    println!("\nindicators:");
    for indicator in &report.bot_behavior_indicators {
        let marker = if indicator.is_positive { "+" } else { "!" };
        println!("  [{}] {}", marker, indicator.text);
    }

    println!("\nsuggestions:");
    for suggestion in &report.credibility_suggestions {
        println!("  - {}", suggestion);
    }

    Ok(())
}

fn run_compare(handles: Vec<String>, platform: String) -> Result<(), Box<dyn std::error::Error>> {
    if handles.len() < 2 {
        return Err("at least two handles required for comparison".into());
    }
    let platform = parse_platform(&platform)?;

    let store = MemStore::new();
    let mut rng = Rng::from_entropy();

    let mut account_ids = Vec::with_capacity(handles.len());
    for handle in &handles {
        let record = credo_score::verify(&store, handle, platform, &MockEnricher, &mut rng)?;
        println!(
            "scored {} -> {}/100",
            record.handle, record.credibility_score
        );
        account_ids.push(record.account_id);
    }

    let result = credo_compare::compare(&store, &account_ids)?;

    println!("\n--- comparison results ---");
    for account in &result.accounts {
        println!(
            "{}: similarity {} (content {}, behavior {}), ~{} common followers",
            account.account_id,
            account.similarity_score,
            account.content_similarity,
            account.behavior_pattern_similarity,
            account.common_followers
        );
    }
    println!("\noverall similarity: {}/100", result.overall_similarity);
    println!("possible connection: {}", result.possible_connection);

    Ok(())
}
