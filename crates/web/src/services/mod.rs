//! Outbound service clients.
//!
//! - `webhook` - Spreadsheet webhook that stores leads and novenas

pub mod webhook;

pub use webhook::{LeadReceipt, NovenaLookup, WebhookClient, WebhookError};
