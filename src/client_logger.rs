//! Logging trait for Gemini client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! every request and response passing through the [`Gemini`](crate::Gemini)
//! client, and [`FileLogger`], which appends them to a file as JSON lines.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde_json::json;

use crate::error::{Error, Result};
use crate::types::{GenerateContentRequest, GenerateContentResponse, Model};

/// A trait for logging Gemini client operations.
///
/// Implementations must not fail the call they observe; a logger that cannot
/// write simply drops the record.
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, model: &Model, request: &GenerateContentRequest);

    /// Log a successfully parsed response.
    fn log_response(&self, model: &Model, response: &GenerateContentResponse);

    /// Log a failed call.
    fn log_error(&self, model: &Model, error: &Error);
}

/// A [`ClientLogger`] that appends one JSON object per line to a file.
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Open `path` for appending, creating it if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|err| Error::io("failed to open log file", err))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn append(&self, record: serde_json::Value) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{record}");
        }
    }
}

impl ClientLogger for FileLogger {
    fn log_request(&self, model: &Model, request: &GenerateContentRequest) {
        self.append(json!({
            "kind": "request",
            "model": model.id(),
            "body": request,
        }));
    }

    fn log_response(&self, model: &Model, response: &GenerateContentResponse) {
        self.append(json!({
            "kind": "response",
            "model": model.id(),
            "body": response,
        }));
    }

    fn log_error(&self, model: &Model, error: &Error) {
        self.append(json!({
            "kind": "error",
            "model": model.id(),
            "message": error.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, KnownModel, UsageMetadata};

    #[test]
    fn file_logger_appends_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "gemchat-logger-{}-{:?}.jsonl",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_file(&path);

        let model = Model::Known(KnownModel::Gemini3ProPreview);
        let logger = FileLogger::create(&path).unwrap();
        logger.log_request(&model, &GenerateContentRequest::new(vec![Content::user("Hello")]));
        logger.log_response(
            &model,
            &GenerateContentResponse {
                usage_metadata: Some(UsageMetadata::new(5, 2, 7)),
                ..GenerateContentResponse::default()
            },
        );
        logger.log_error(&model, &Error::timeout("slow", None));
        drop(logger);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "request");
        assert_eq!(lines[0]["model"], "gemini-3-pro-preview");
        assert_eq!(lines[0]["body"]["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(lines[1]["kind"], "response");
        assert_eq!(lines[1]["body"]["usageMetadata"]["totalTokenCount"], 7);
        assert_eq!(lines[2]["kind"], "error");
        assert_eq!(lines[2]["message"], "Timeout error: slow");
    }
}
