//! Configuration for the content backend
//!
//! CLI arguments and environment variable handling using clap.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use uuid::Uuid;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// MongoDB collections
    Mongo,
    /// In-process collections, lost on exit
    Memory,
}

/// Crafter CMS - content backend for the Crafter Tapes site
#[derive(Parser, Debug, Clone)]
#[command(name = "crafter-cms")]
#[command(about = "Content backend for products, blog posts, industries and inquiries")]
pub struct Args {
    /// Unique node identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Storage backend
    #[arg(long, env = "STORE", value_enum, default_value = "mongo")]
    pub store: StoreKind,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "crafter")]
    pub mongodb_db: String,

    /// Enable development mode (falls back to the in-memory store when MongoDB is unreachable)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Seed demo data once at startup
    #[arg(long, env = "SEED_ON_START", default_value = "false")]
    pub seed_on_start: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit JSON log lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Largest accepted request body in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "1048576")]
    pub max_body_bytes: usize,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be greater than zero".to_string());
        }

        if self.store == StoreKind::Mongo && self.mongodb_db.trim().is_empty() {
            return Err("MONGODB_DB must not be empty".to_string());
        }

        Ok(())
    }

    /// Defaults with the in-memory store, for tests and embedding
    pub fn in_memory() -> Self {
        Self {
            node_id: Uuid::new_v4(),
            listen: SocketAddr::from(([127, 0, 0, 1], 0)),
            store: StoreKind::Memory,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_db: "crafter".to_string(),
            dev_mode: true,
            seed_on_start: false,
            log_level: "info".to_string(),
            log_json: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}
