//! Gemini client — the single point of entry for all Generative Language API
//! calls in CareerOS.
//!
//! ARCHITECTURAL RULE: No other module may call the provider directly.
//! All generation requests MUST go through this module.
//!
//! Model selection is best-effort: the client asks the provider which models
//! it offers and prefers a "flash" variant; if the listing cannot be used,
//! a hardcoded model takes over and the listing failure never propagates.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when discovery succeeds but advertises no eligible flash model.
pub const DEFAULT_MODEL: &str = "models/gemini-pro";

/// Model used when the listing call itself fails.
pub const DISCOVERY_FALLBACK_MODEL: &str = "models/gemini-1.5-flash";

/// Generation method a model must advertise to be eligible for selection.
const GENERATE_CONTENT_METHOD: &str = "generateContent";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Missing API Key. Please add it in Settings.")]
    MissingKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned a response with no generated text")]
    MalformedResponse,
}

/// Closed error taxonomy surfaced to API callers alongside the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CredentialMissing,
    UpstreamFailure,
    MalformedResponse,
}

impl GeminiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeminiError::MissingKey => ErrorKind::CredentialMissing,
            GeminiError::Http(_) | GeminiError::Api { .. } => ErrorKind::UpstreamFailure,
            GeminiError::MalformedResponse => ErrorKind::MalformedResponse,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelListing {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single Gemini client used by all services in CareerOS.
/// Holds the process-wide fallback key; callers may override it per request.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    default_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(default_key: Option<String>) -> Self {
        Self::with_base_url(default_key, GEMINI_API_BASE.to_string())
    }

    /// Points the client at an alternate provider base URL. Tests use this
    /// to direct traffic at a local listener.
    pub fn with_base_url(default_key: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            default_key,
            base_url,
        }
    }

    /// Resolves which key authenticates the outbound calls: a non-empty
    /// caller-supplied key wins, then the process-wide key. Runs before any
    /// network I/O so a missing key never costs a request.
    fn resolve_key<'a>(&'a self, override_key: Option<&'a str>) -> Result<&'a str, GeminiError> {
        if let Some(key) = override_key.filter(|k| !k.is_empty()) {
            return Ok(key);
        }
        self.default_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingKey)
    }

    /// Asks the provider which models it offers and returns the preferred
    /// eligible one, or `None` when the listing contains no flash model that
    /// supports content generation.
    async fn discover_model(&self, key: &str) -> Result<Option<String>, GeminiError> {
        let url = format!("{}/models?key={}", self.base_url, key);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let listing: ModelListing = response.json().await?;
        Ok(pick_flash_model(&listing.models))
    }

    /// Two-step model resolution. Discovery is best-effort: its failure is
    /// logged and folded into a hardcoded model, never surfaced to callers.
    pub async fn resolve_model(&self, key: &str) -> String {
        match self.discover_model(key).await {
            Ok(Some(name)) => name,
            Ok(None) => DEFAULT_MODEL.to_string(),
            Err(e) => {
                warn!("model discovery failed, using {DISCOVERY_FALLBACK_MODEL}: {e}");
                DISCOVERY_FALLBACK_MODEL.to_string()
            }
        }
    }

    /// Generates text for a prompt. One listing call, one generation call,
    /// no retries, transport-default timeout.
    pub async fn generate(
        &self,
        prompt: &str,
        override_key: Option<&str>,
    ) -> Result<String, GeminiError> {
        let key = self.resolve_key(override_key)?;
        let model = self.resolve_model(key).await;

        let url = format!("{}/{}:generateContent?key={}", self.base_url, model, key);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's structured error message over the raw body
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response.json().await?;
        let text = extract_text(response)?;

        debug!("generation succeeded: model={model}, chars={}", text.len());

        Ok(text)
    }
}

/// Scans a model listing for generation-capable models and keeps the last
/// one whose identifier mentions "flash".
fn pick_flash_model(models: &[ModelInfo]) -> Option<String> {
    models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_CONTENT_METHOD)
        })
        .filter(|m| m.name.contains("flash"))
        .last()
        .map(|m| m.name.clone())
}

/// Pulls the text of the first part of the first candidate out of a
/// generation response.
fn extract_text(response: GenerateContentResponse) -> Result<String, GeminiError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(GeminiError::MalformedResponse)
}

/// Local stand-in for the provider, shared by the client tests here and the
/// handler tests in `routes`.
#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::Router;

    /// Records every request the fake provider receives.
    pub struct MockProvider {
        pub base_url: String,
        pub hits: Arc<AtomicUsize>,
        pub keys: Arc<Mutex<Vec<String>>>,
        pub paths: Arc<Mutex<Vec<String>>>,
    }

    impl MockProvider {
        pub fn hit_count(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub fn observed_keys(&self) -> Vec<String> {
            self.keys.lock().unwrap().clone()
        }

        pub fn generation_paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    /// Binds a provider double to an ephemeral local port. The listing and
    /// generation endpoints answer with the supplied status/body pairs.
    pub async fn spawn_provider(
        listing: (StatusCode, &'static str),
        generation: (StatusCode, &'static str),
    ) -> MockProvider {
        let hits = Arc::new(AtomicUsize::new(0));
        let keys = Arc::new(Mutex::new(Vec::new()));
        let paths = Arc::new(Mutex::new(Vec::new()));

        let list_route = {
            let hits = hits.clone();
            let keys = keys.clone();
            move |Query(params): Query<HashMap<String, String>>| {
                let hits = hits.clone();
                let keys = keys.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    keys.lock()
                        .unwrap()
                        .push(params.get("key").cloned().unwrap_or_default());
                    listing
                }
            }
        };

        let generate_route = {
            let hits = hits.clone();
            let keys = keys.clone();
            let paths = paths.clone();
            move |Path(path): Path<String>, Query(params): Query<HashMap<String, String>>| {
                let hits = hits.clone();
                let keys = keys.clone();
                let paths = paths.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    keys.lock()
                        .unwrap()
                        .push(params.get("key").cloned().unwrap_or_default());
                    paths.lock().unwrap().push(path);
                    generation
                }
            }
        };

        let app = Router::new()
            .route("/models", get(list_route))
            .route("/*path", post(generate_route));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock provider");
        });

        MockProvider {
            base_url: format!("http://{addr}"),
            hits,
            keys,
            paths,
        }
    }

    pub const LISTING_WITH_FLASH: &str = r#"{
        "models": [
            {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]},
            {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]},
            {"name": "models/gemini-1.5-flash-8b", "supportedGenerationMethods": ["generateContent"]}
        ]
    }"#;

    pub const LISTING_WITHOUT_FLASH: &str = r#"{
        "models": [
            {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]}
        ]
    }"#;

    pub const GENERATION_OK: &str = r#"{
        "candidates": [
            {"content": {"parts": [{"text": "Generated answer."}]}}
        ]
    }"#;

    pub const GENERATION_NO_CANDIDATES: &str = r#"{"candidates": []}"#;
}
