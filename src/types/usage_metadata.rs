use serde::{Deserialize, Serialize};

/// Token accounting returned alongside a `generateContent` reply.
///
/// Gemini bills by prompt and candidate tokens.  The API sometimes omits a
/// counter that would be zero, so every field defaults to 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt, including the full transcript sent with it.
    #[serde(default)]
    pub prompt_token_count: u64,

    /// Tokens in the generated candidates.
    #[serde(default)]
    pub candidates_token_count: u64,

    /// Total tokens for the request as reported by the API.
    #[serde(default)]
    pub total_token_count: u64,

    /// Tokens spent on model reasoning, when the model reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thoughts_token_count: Option<u64>,

    /// Prompt tokens served from the context cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_content_token_count: Option<u64>,
}

impl UsageMetadata {
    /// Create usage from the three counters every response carries.
    pub fn new(
        prompt_token_count: u64,
        candidates_token_count: u64,
        total_token_count: u64,
    ) -> Self {
        Self {
            prompt_token_count,
            candidates_token_count,
            total_token_count,
            thoughts_token_count: None,
            cached_content_token_count: None,
        }
    }

    /// Set the reasoning token count.
    pub fn with_thoughts_token_count(mut self, tokens: u64) -> Self {
        self.thoughts_token_count = Some(tokens);
        self
    }
}
