//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation
//! transcript and performs one request per turn.

use async_trait::async_trait;

use crate::client::Gemini;
use crate::error::{Error, Result};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, Model, UsageMetadata,
};

/// Something that can answer a `generateContent` request.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the request and wait for the whole reply.
    async fn generate(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[async_trait]
impl ChatBackend for Gemini {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.generate_content(model, request).await
    }
}

/// The outcome of a successful turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    /// The model's reply text.
    pub text: String,
    /// Token accounting, when the API returned it.
    pub usage: Option<UsageMetadata>,
}

/// A chat session that owns the transcript and talks to a backend.
///
/// The transcript only ever holds complete exchanges: a turn that fails is
/// rolled back before the error is returned.
pub struct ChatSession<B: ChatBackend = Gemini> {
    backend: B,
    model: Model,
    transcript: Vec<Content>,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Creates a new chat session with an empty transcript.
    pub fn new(backend: B, model: Model) -> Self {
        Self {
            backend,
            model,
            transcript: Vec::new(),
        }
    }

    /// Sends a user message along with the transcript and waits for the reply.
    ///
    /// This method:
    /// 1. Adds the user message to the transcript
    /// 2. Sends the whole transcript to the backend
    /// 3. Adds the reply to the transcript
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply carries no text; in
    /// both cases the transcript is left as it was before the call.
    pub async fn send(&mut self, user_input: &str) -> Result<TurnReply> {
        let previous_len = self.transcript.len();
        self.transcript.push(Content::user(user_input));

        let request = GenerateContentRequest::new(self.transcript.clone());
        let outcome = self.backend.generate(&self.model, &request).await;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                self.transcript.truncate(previous_len);
                return Err(err);
            }
        };
        let Some(text) = response.text() else {
            self.transcript.truncate(previous_len);
            return Err(Error::empty_response(response.empty_reason()));
        };

        self.transcript.push(Content::model(text.clone()));
        Ok(TurnReply {
            text,
            usage: response.usage_metadata,
        })
    }

    /// Returns the conversation so far.
    pub fn transcript(&self) -> &[Content] {
        &self.transcript
    }

    /// Returns the number of entries in the transcript.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the model in use.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
