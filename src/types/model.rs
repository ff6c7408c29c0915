use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a Gemini model identifier.
///
/// This can be a predefined model or a custom string value for models this
/// crate does not know about yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier
    Custom(String),
}

/// Known Gemini model versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// Gemini 3 Pro (preview)
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3ProPreview,

    /// Gemini 2.5 Pro
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,

    /// Gemini 2.5 Flash
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
}

impl KnownModel {
    /// The identifier used in request paths.
    pub fn id(&self) -> &'static str {
        match self {
            KnownModel::Gemini3ProPreview => "gemini-3-pro-preview",
            KnownModel::Gemini25Pro => "gemini-2.5-pro",
            KnownModel::Gemini25Flash => "gemini-2.5-flash",
        }
    }

    /// A human-friendly name for banners and panel titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            KnownModel::Gemini3ProPreview => "Gemini 3 Pro",
            KnownModel::Gemini25Pro => "Gemini 2.5 Pro",
            KnownModel::Gemini25Flash => "Gemini 2.5 Flash",
        }
    }
}

impl Model {
    /// The identifier used in request paths.
    pub fn id(&self) -> &str {
        match self {
            Model::Known(known) => known.id(),
            Model::Custom(custom) => custom,
        }
    }

    /// A human-friendly name; custom models are shown by identifier.
    pub fn display_name(&self) -> &str {
        match self {
            Model::Known(known) => known.display_name(),
            Model::Custom(custom) => custom,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for KnownModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini-3-pro-preview" => Ok(KnownModel::Gemini3ProPreview),
            "gemini-2.5-pro" => Ok(KnownModel::Gemini25Pro),
            "gemini-2.5-flash" => Ok(KnownModel::Gemini25Flash),
            _ => Err(format!("unknown model: {s}")),
        }
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        model
            .parse::<KnownModel>()
            .map(Model::Known)
            .unwrap_or_else(|_| Model::Custom(model.to_string()))
    }
}
