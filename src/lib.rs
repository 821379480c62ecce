// src/lib.rs

//! Bless Crawl client library
//!
//! Validated `scrape` / `map` / `crawl` operations dispatched either to an
//! in-process host binding or to a remote execution endpoint.

pub mod client;
pub mod error;
pub mod models;
pub mod protocol;
pub mod schema;
pub mod settings;
pub mod utils;

pub use client::{BlessCrawl, Mode};
pub use error::{BlessCrawlError, ErrorCode, ErrorKind, Result};
