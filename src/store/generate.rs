//! Client for the store's opaque text-generation endpoints.
//!
//! The store regenerates summary text or replacement FAQ entries remotely;
//! from this side those are plain request/response calls that return text.

use reqwest::Method;
use serde::Deserialize;

use crate::error::AppError;
use crate::store::client::StoreClient;

#[derive(Debug, Deserialize)]
struct WireRegenerated {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNewFaq {
    new_faq: Vec<String>,
}

/// Client for remote text generation.
#[derive(Clone)]
pub struct GenerationClient {
    client: StoreClient,
}

impl GenerationClient {
    /// Creates a new generation client wrapping the given store client.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Regenerates text for the given prompt.
    ///
    /// # Errors
    ///
    /// - `AppError::Validation` - empty prompt rejected by the store
    pub async fn regenerate(&self, prompt: &str) -> Result<String, AppError> {
        let body = serde_json::json!({ "prompt": prompt });
        let wire: WireRegenerated = self
            .client
            .request_json(Method::POST, "/api/regenerate", Some(body))
            .await?;
        Ok(wire.generated_text)
    }

    /// Generates a replacement FAQ entry, avoiding repetition of the
    /// existing one. Returns the question and answer joined by `@`, the
    /// store's separator convention.
    pub async fn generate_new_faq(&self, existing_faq: &str) -> Result<String, AppError> {
        let body = serde_json::json!({ "existingFaq": existing_faq });
        let wire: WireNewFaq = self
            .client
            .request_json(Method::POST, "/api/generate-new-faq", Some(body))
            .await?;
        wire.new_faq
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("Store returned an empty FAQ list".to_string()))
    }
}
