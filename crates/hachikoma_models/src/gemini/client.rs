//! Google Gemini REST client.
//!
//! Talks to the `generateContent` endpoint directly over reqwest. Both the
//! story model (text, JSON mode) and the image model (text + image
//! modalities, inline reference images) go through the same client; the
//! request's `model` field selects which one a call hits.
//!
//! Transport-level overload is retried with bounded exponential backoff
//! (see [`crate::retry`]); everything else propagates on first failure.

use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument};

use super::{GeminiResult, dto};
use crate::retry::{RetryPolicy, retry_transient};
use hachikoma_core::{GenerateRequest, GenerateResponse};
use hachikoma_error::{GeminiError, GeminiErrorKind, HachikomaResult};
use hachikoma_interface::{HachikomaDriver, Metadata, ModelMetadata, Vision};

/// Model used for story generation.
pub const STORY_MODEL: &str = "gemini-3-flash-preview";

/// Model used for image generation.
pub const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Google Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model_name: String,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl std::fmt::Debug for GeminiClient {
    // The api_key is deliberately absent from Debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client reading the API key from the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hachikoma_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> HachikomaResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key).map_err(Into::into)
    }

    /// Create a new Gemini client with an explicit API key.
    #[instrument(name = "gemini_client_with_api_key", skip(api_key))]
    pub fn with_api_key(api_key: impl Into<String>) -> GeminiResult<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model_name: STORY_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Override the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Override the default model used when a request names none.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_name = model.into();
        self
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model_name = req.model().as_deref().unwrap_or(self.model_name.as_str());
        let url = format!("{}/models/{}:generateContent", self.base_url, model_name);
        let body = dto::to_generate_content_request(req);

        debug!(
            model = %model_name,
            contents = body.contents.len(),
            "Sending generateContent request"
        );

        // Only the round trip is retried; decoding a delivered response is
        // never transient.
        let response = retry_transient(&self.retry_policy, || self.send_once(&url, &body)).await?;

        dto::to_generate_response(response)
    }

    /// One HTTP round trip: send, check status, decode the body.
    async fn send_once(
        &self,
        url: &str,
        body: &dto::GenerateContentRequest,
    ) -> GeminiResult<dto::GenerateContentResponse> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        response
            .json::<dto::GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))
    }
}

#[async_trait]
impl HachikomaDriver for GeminiClient {
    #[instrument(skip(self, req), fields(model = %self.model_name))]
    async fn generate(&self, req: &GenerateRequest) -> HachikomaResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl Metadata for GeminiClient {
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            provider: "gemini",
            model: self.model_name.clone(),
            max_input_tokens: 1_048_576,
            max_output_tokens: 8192,
            supports_vision: true,
            supports_json_mode: true,
            supports_image_output: true,
        }
    }
}

impl Vision for GeminiClient {
    fn max_images_per_request(&self) -> usize {
        16 // Gemini supports multiple images
    }

    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp"]
    }

    fn max_image_size_bytes(&self) -> usize {
        20 * 1024 * 1024 // 20MB
    }
}
