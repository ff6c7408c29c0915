//! A terminal chat client for the Gemini API that prices every turn.

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod cost;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;

// Re-exports
pub use client::{API_KEY_ENV, Gemini, resolve_api_key};
pub use client_logger::{ClientLogger, FileLogger};
pub use cost::{Pricing, PricingTier, SessionCost, TurnCost, format_usd};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer, format_usage_table};
pub use types::*;
