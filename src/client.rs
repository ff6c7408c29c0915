use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{GenerateContentRequest, GenerateContentResponse, Model};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Resolve the API key, falling back to [`API_KEY_ENV`] when none is given.
///
/// A missing or blank key is a configuration error.
pub fn resolve_api_key(api_key: Option<String>) -> Result<String> {
    let api_key = match api_key {
        Some(key) => key,
        None => env::var(API_KEY_ENV).map_err(|_| {
            Error::configuration(format!(
                "API key not provided and {API_KEY_ENV} environment variable not set"
            ))
        })?,
    };
    if api_key.trim().is_empty() {
        return Err(Error::configuration(format!("{API_KEY_ENV} is empty")));
    }
    Ok(api_key)
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Gemini {
    /// Create a new Gemini client.
    ///
    /// The API key can be provided directly or read from the GEMINI_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(api_key)?;
        HeaderValue::from_str(&api_key).map_err(|_| {
            Error::configuration(format!("{API_KEY_ENV} contains invalid characters"))
        })?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        let base_url = Url::parse(base_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

        Ok(Self {
            api_key,
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that sees every request, response, and failure.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            Error::configuration(format!("{API_KEY_ENV} contains invalid characters"))
        })?;
        headers.insert("x-goog-api-key", key);
        Ok(headers)
    }

    fn endpoint(&self, model: &Model) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("models/{}:generateContent", model.id()))?)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error);
        let status = detail.as_ref().and_then(|d| d.status.clone());
        let message = detail
            .and_then(|d| d.message)
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(message),
            401 => Error::authentication(message),
            403 => Error::permission(message),
            404 => Error::not_found(message),
            408 => Error::timeout(message, None),
            429 => Error::rate_limit(message, retry_after),
            500 => Error::internal_server(message),
            502..=504 => Error::service_unavailable(message, retry_after),
            _ => Error::api(status_code, status, message),
        }
    }

    /// Send the conversation to the model and wait for the whole reply.
    pub async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(model, request);
        }
        let start = Instant::now();
        let result = self.generate_content_inner(model, request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(model, response);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(model, err);
                }
            }
        }
        result
    }

    async fn generate_content_inner(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model)?;

        let response = self
            .client
            .post(url)
            .headers(self.default_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                Error::serialization(
                    format!("Failed to parse response: {}", e),
                    Some(Box::new(e)),
                )
            })
    }
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatSession, PlainTextRenderer, TurnOutcome, run_turn};
    use crate::cost::{PricingTier, SessionCost};
    use crate::types::{Content, KnownModel, UsageMetadata};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request text.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
             content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            if name.eq_ignore_ascii_case("content-length") {
                                value.trim().parse::<usize>().ok()
                            } else {
                                None
                            }
                        })
                        .unwrap_or(0);
                    if request.len() >= split + 4 + length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/v1beta/"), handle)
    }

    /// Accept connections and read requests without ever answering them.
    async fn serve_silently() -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    while let Ok(n) = socket.read(&mut buf).await {
                        if n == 0 {
                            break;
                        }
                    }
                });
            }
        });
        (format!("http://{addr}/v1beta/"), handle)
    }

    fn model() -> Model {
        Model::Known(KnownModel::Gemini3ProPreview)
    }

    #[test]
    fn client_creation() {
        let client = Gemini::new(Some("test-key".to_string())).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = Gemini::with_options(
            Some("test-key".to_string()),
            Some("https://custom-api.example.com/v1/".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url.as_str(), "https://custom-api.example.com/v1/");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn blank_key_is_configuration_error() {
        let err = resolve_api_key(Some("   ".to_string())).unwrap_err();
        assert!(err.is_configuration());
        let err = Gemini::new(Some(String::new())).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn bad_base_url() {
        let err = Gemini::with_options(Some("k".to_string()), Some("not a url".to_string()), None)
            .unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn endpoint_includes_model() {
        let client = Gemini::new(Some("test-key".to_string())).unwrap();
        assert_eq!(
            client.endpoint(&model()).unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn generate_content_success() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hi!"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 5, "candidatesTokenCount": 2, "totalTokenCount": 7
            }
        }"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = Gemini::with_options(Some("secret".to_string()), Some(base), None).unwrap();

        let request = GenerateContentRequest::new(vec![Content::user("Hello")]);
        let response = client.generate_content(&model(), &request).await.unwrap();
        assert_eq!(response.text(), Some("Hi!".to_string()));
        assert_eq!(response.usage_metadata, Some(UsageMetadata::new(5, 2, 7)));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-3-pro-preview:generateContent "));
        assert!(raw.to_lowercase().contains("x-goog-api-key: secret"));
        assert!(raw.contains(r#""text":"Hello""#));
    }

    #[tokio::test]
    async fn generate_content_maps_errors() {
        let body = r#"{
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        }"#;
        let (base, server) = serve_once("429 Too Many Requests", body).await;
        let client = Gemini::with_options(Some("secret".to_string()), Some(base), None).unwrap();

        let request = GenerateContentRequest::new(vec![Content::user("Hello")]);
        let err = client.generate_content(&model(), &request).await.unwrap_err();
        assert!(err.is_rate_limit());
        assert_eq!(err.to_string(), "Rate limit exceeded: Resource exhausted");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn generate_content_unknown_status() {
        let (base, server) = serve_once("418 I'm a teapot", "short and stout").await;
        let client = Gemini::with_options(Some("secret".to_string()), Some(base), None).unwrap();

        let request = GenerateContentRequest::new(vec![Content::user("Hello")]);
        let err = client.generate_content(&model(), &request).await.unwrap_err();
        assert_eq!(err.status_code(), Some(418));
        assert_eq!(err.to_string(), "API error 418: short and stout");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn generate_content_times_out() {
        let (base, server) = serve_silently().await;
        let client = Gemini::with_options(
            Some("secret".to_string()),
            Some(base),
            Some(Duration::from_millis(50)),
        )
        .unwrap();

        let request = GenerateContentRequest::new(vec![Content::user("Hello")]);
        let err = client.generate_content(&model(), &request).await.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert!(err.is_timeout());

        let mut session = ChatSession::new(client, model());
        let mut cost = SessionCost::new();
        cost.record(&PricingTier::Standard.pricing().turn_cost(&UsageMetadata::new(5, 2, 7)));
        let before = cost;
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        let outcome = run_turn(
            &mut session,
            &mut cost,
            PricingTier::Standard,
            &mut renderer,
            "Hello",
        )
        .await;
        assert!(matches!(outcome, TurnOutcome::Failed(ref err) if err.is_timeout()));
        assert_eq!(cost, before);
        assert_eq!(session.message_count(), 0);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("Timeout error"));
        server.abort();
    }

    #[tokio::test]
    async fn generate_content_malformed_body() {
        let (base, server) = serve_once("200 OK", "{not json").await;
        let client = Gemini::with_options(Some("secret".to_string()), Some(base), None).unwrap();

        let request = GenerateContentRequest::new(vec![Content::user("Hello")]);
        let err = client.generate_content(&model(), &request).await.unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
        server.await.unwrap();
    }
}
