//! Crafter CMS - content backend for the Crafter Tapes marketing site
//!
//! Serves the product catalog, blog, industry pages, free-form pages,
//! customer inquiries and site settings over a small JSON function API,
//! backed by MongoDB (or in-process collections in development).
//!
//! ## Components
//!
//! - **Store**: typed collections with declared indexes (`db`)
//! - **Query**: index selection for filtered listings (`query`)
//! - **Services**: every query/mutation function plus seed/clear (`services`)
//! - **Forms**: admin form state, array-field editing and submit flow (`forms`)
//! - **HTTP**: health, admin and function-call routes (`routes`, `server`)

pub mod config;
pub mod db;
pub mod forms;
pub mod logging;
pub mod query;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use services::ContentService;
pub use types::{CmsError, Result};
