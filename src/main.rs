//! Crafter CMS - content backend for the Crafter Tapes marketing site

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use crafter_cms::{
    config::{Args, StoreKind},
    db::{Collections, MongoClient},
    logging, server, AppState, ContentService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(&args.log_level, args.log_json);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Crafter CMS - Crafter Tapes content");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("Store: {:?}", args.store);
    if args.store == StoreKind::Mongo {
        info!("MongoDB: {} (db '{}')", args.mongodb_uri, args.mongodb_db);
    }
    info!("Max body: {} bytes", args.max_body_bytes);
    info!("======================================");

    let collections = match args.store {
        StoreKind::Memory => {
            warn!("Using in-memory store; content is lost on exit");
            Collections::memory()
        }
        StoreKind::Mongo => match open_mongo(&args).await {
            Ok(collections) => collections,
            Err(e) if args.dev_mode => {
                warn!("MongoDB unavailable (dev mode, falling back to in-memory store): {}", e);
                Collections::memory()
            }
            Err(e) => {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        },
    };

    let service = Arc::new(ContentService::new(collections));

    if args.seed_on_start {
        let report = service.seed_demo_data().await?;
        if report.success {
            info!("Startup seed: {}", report.message);
        } else {
            warn!("Startup seed skipped: {}", report.message);
        }
    }

    let state = Arc::new(AppState::new(args, service));
    server::run(state).await?;

    Ok(())
}

async fn open_mongo(args: &Args) -> crafter_cms::Result<Collections> {
    let client = MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await?;
    let collections = Collections::mongo(&client).await?;
    info!("MongoDB connected successfully");
    Ok(collections)
}
