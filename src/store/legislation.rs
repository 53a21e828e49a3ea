//! Typed client for the store's legislation resource.
//!
//! Bills are addressed by `(congress_id, legislative_id)` rather than their
//! surrogate row id. Creation goes through the store's generate-and-save
//! endpoint, which fetches the bill text and synthesizes a summary
//! downstream — an expensive opaque call, which is why the bulk import path
//! issues these strictly one at a time.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::client::StoreClient;

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

/// A legislative bill as returned by the store (snake_case wire shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislativeBill {
    pub id: u64,
    pub legislative_id: String,
    pub congress_id: i64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Partial update for an existing bill. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legislative_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congress_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// LegislationClient
// ─────────────────────────────────────────────────────────────────────────────

/// Client for legislation CRUD and generation against the content store.
#[derive(Clone)]
pub struct LegislationClient {
    client: StoreClient,
}

impl LegislationClient {
    /// Creates a new legislation client wrapping the given store client.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetches a single bill by congress and legislative id.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` - no bill with those ids
    pub async fn fetch_bill(
        &self,
        congress_id: i64,
        legislative_id: u64,
    ) -> Result<LegislativeBill, AppError> {
        self.client
            .request_json(
                Method::GET,
                &format!("/api/legislation/{}/{}", congress_id, legislative_id),
                None,
            )
            .await
    }

    /// Asks the store to fetch, summarize, and persist a bill.
    ///
    /// This triggers expensive downstream generation work; callers doing this
    /// in bulk must issue the calls sequentially (see the bulk importer).
    pub async fn generate_and_save(
        &self,
        congress_id: i64,
        legislative_id: u64,
    ) -> Result<(), AppError> {
        self.client
            .expect_success(
                Method::POST,
                &format!(
                    "/api/legislation/generate-and-save-legislation/{}/{}",
                    congress_id, legislative_id
                ),
                None,
            )
            .await?;
        Ok(())
    }

    /// Applies a partial update to an existing bill and returns the updated
    /// record.
    pub async fn update(
        &self,
        congress_id: i64,
        legislative_id: u64,
        patch: &BillPatch,
    ) -> Result<LegislativeBill, AppError> {
        let body = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(format!("Failed to serialize patch: {}", e)))?;
        self.client
            .request_json(
                Method::PUT,
                &format!("/api/legislation/{}/{}", congress_id, legislative_id),
                Some(body),
            )
            .await
    }

    /// Deletes every bill in the store.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.client
            .expect_success(Method::DELETE, "/api/legislation/bills/clear", None)
            .await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::client::StoreConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_client(base: &str) -> LegislationClient {
        let config = StoreConfig::new(Url::parse(base).unwrap());
        LegislationClient::new(StoreClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn fetch_bill_parses_record() {
        let server = MockServer::start().await;
        let client = create_client(&server.uri());

        Mock::given(method("GET"))
            .and(path("/api/legislation/118/1234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 51,
                "legislative_id": "1234",
                "congress_id": 118,
                "summary": "An act to do things.",
                "bill_name": "Doing Things Act",
                "text": null,
                "link": "https://example.gov/118/1234"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let bill = client.fetch_bill(118, 1234).await.unwrap();
        assert_eq!(bill.legislative_id, "1234");
        assert_eq!(bill.congress_id, 118);
        assert_eq!(bill.bill_name.as_deref(), Some("Doing Things Act"));
        assert!(bill.text.is_none());
    }

    #[tokio::test]
    async fn fetch_missing_bill_is_not_found() {
        let server = MockServer::start().await;
        let client = create_client(&server.uri());

        Mock::given(method("GET"))
            .and(path("/api/legislation/118/9999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Legislative bill not found"})),
            )
            .mount(&server)
            .await;

        let result = client.fetch_bill(118, 9999).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn generate_and_save_posts_to_generation_endpoint() {
        let server = MockServer::start().await;
        let client = create_client(&server.uri());

        Mock::given(method("POST"))
            .and(path(
                "/api/legislation/generate-and-save-legislation/118/42",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Saved"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client.generate_and_save(118, 42).await.unwrap();
    }

    #[tokio::test]
    async fn update_sends_patch_and_returns_updated_bill() {
        let server = MockServer::start().await;
        let client = create_client(&server.uri());

        Mock::given(method("PUT"))
            .and(path("/api/legislation/118/42"))
            .and(body_partial_json(
                serde_json::json!({"summary": "new summary"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "legislative_id": "42",
                "congress_id": 118,
                "summary": "new summary",
                "bill_name": null,
                "text": null,
                "link": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let patch = BillPatch {
            summary: Some("new summary".into()),
            ..BillPatch::default()
        };
        let bill = client.update(118, 42, &patch).await.unwrap();
        assert_eq!(bill.summary.as_deref(), Some("new summary"));
    }
}
