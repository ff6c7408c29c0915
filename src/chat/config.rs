//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved,
//! immutable configuration a chat process runs with.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{DEFAULT_TIMEOUT, Gemini, resolve_api_key};
use crate::client_logger::FileLogger;
use crate::cost::{Pricing, PricingTier};
use crate::error::Result;
use crate::types::{KnownModel, Model};

/// The model every chat runs against.
pub const DEFAULT_MODEL: KnownModel = KnownModel::Gemini3ProPreview;

/// Command-line arguments for the gemchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Bill at the long-context price tier.
    #[arrrg(flag, "Use >200k-context pricing ($4/M in, $18/M out)")]
    pub long_context: bool,

    /// Network timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 300)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Append every request and response to this file.
    #[arrrg(optional, "Append API traffic to FILE as JSON lines", "FILE")]
    pub log_file: Option<String>,
}

/// Configuration for a chat process.
///
/// Built once at startup and never changed afterwards.
#[derive(Clone)]
pub struct ChatConfig {
    /// The API credential.
    pub api_key: String,

    /// The model to use for generating responses.
    pub model: Model,

    /// The price band turns are billed at.
    pub pricing_tier: PricingTier,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Upper bound on a single request.
    pub timeout: Duration,

    /// Where to write the JSON-lines traffic log, if anywhere.
    pub log_file: Option<PathBuf>,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gemini-3-pro-preview
    /// - Pricing: standard (<=200k context)
    /// - Color: enabled
    /// - Timeout: 300 seconds
    /// - Traffic log: disabled
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Model::Known(DEFAULT_MODEL),
            pricing_tier: PricingTier::Standard,
            use_color: true,
            timeout: DEFAULT_TIMEOUT,
            log_file: None,
        }
    }

    /// Resolve the configuration from arguments and the credential.
    ///
    /// When `api_key` is `None` the key is read from `GEMINI_API_KEY`; a
    /// missing or blank key is an error.
    pub fn from_args(args: ChatArgs, api_key: Option<String>) -> Result<Self> {
        let mut config = ChatConfig::new(resolve_api_key(api_key)?);
        if args.no_color {
            config = config.without_color();
        }
        if args.long_context {
            config = config.with_pricing_tier(PricingTier::LongContext);
        }
        if let Some(secs) = args.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(path) = args.log_file {
            config = config.with_log_file(Some(PathBuf::from(path)));
        }
        Ok(config)
    }

    /// Sets the pricing tier.
    pub fn with_pricing_tier(mut self, tier: PricingTier) -> Self {
        self.pricing_tier = tier;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the traffic log path.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// The unit prices in effect.
    pub fn pricing(&self) -> Pricing {
        self.pricing_tier.pricing()
    }

    /// Build the API client this configuration describes.
    pub fn build_client(&self) -> Result<Gemini> {
        let client = Gemini::with_options(Some(self.api_key.clone()), None, Some(self.timeout))?;
        match &self.log_file {
            Some(path) => Ok(client.with_logger(Arc::new(FileLogger::create(path)?))),
            None => Ok(client),
        }
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("pricing_tier", &self.pricing_tier)
            .field("use_color", &self.use_color)
            .field("timeout", &self.timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new("key");
        assert_eq!(config.model, Model::Known(KnownModel::Gemini3ProPreview));
        assert_eq!(config.pricing_tier, PricingTier::Standard);
        assert_eq!(config.pricing(), Pricing::new(2.0, 12.0));
        assert!(config.use_color);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from_args(ChatArgs::default(), Some("key".to_string())).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.pricing_tier, PricingTier::Standard);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            no_color: true,
            long_context: true,
            timeout_secs: Some(30),
            log_file: Some("traffic.jsonl".to_string()),
        };
        let config = ChatConfig::from_args(args, Some("key".to_string())).unwrap();
        assert!(!config.use_color);
        assert_eq!(config.pricing(), Pricing::new(4.0, 18.0));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_file, Some(PathBuf::from("traffic.jsonl")));
    }

    #[test]
    fn blank_credential_fails_fast() {
        let err = ChatConfig::from_args(ChatArgs::default(), Some("  ".to_string())).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn debug_redacts_key() {
        let config = ChatConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn build_client_uses_timeout() {
        let config = ChatConfig::new("key").with_timeout(Duration::from_secs(12));
        let client = config.build_client().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(12));
    }
}
