//! Novenapp Core - Shared domain library.
//!
//! This crate provides the pieces shared by the web server and the CLI:
//! - `web` - Public site and JSON API
//! - `cli` - Command-line tools for exercising a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no HTTP clients, no
//! server code. Decisions that touch the outside world (like caching a
//! response) are returned as values for the caller to carry out.
//!
//! # Modules
//!
//! - [`types`] - Lead submissions, novena records, slugs and day numbers
//! - [`content`] - Devotional text for the nine days
//! - [`analytics`] - GA4 event catalog
//! - [`offline`] - Service worker cache policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod content;
pub mod offline;
pub mod types;

pub use types::*;
