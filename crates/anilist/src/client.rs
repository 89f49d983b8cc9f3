use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::models::GraphQlResponse;
use crate::query::GraphQlRequest;

pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co/";

/// AniList GraphQL API client
pub struct AnilistClient {
    client: Client,
    endpoint: String,
}

impl AnilistClient {
    /// Create an AnilistClient for the public endpoint
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Create an AnilistClient for a custom endpoint
    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Send one GraphQL query and decode the response.
    ///
    /// An `errors` array in the body is returned to the caller, not turned
    /// into an error here, and `data` is left undecoded when one is present.
    /// POST https://graphql.anilist.co/
    pub async fn query<D: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
    ) -> crate::Result<GraphQlResponse<D>> {
        tracing::debug!(
            "Querying AniList at {} with {:?}",
            self.endpoint,
            request.variables
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("AniList responded with HTTP {}", status);

        // "Not found" comes back as a 404 whose body still carries `errors`
        GraphQlResponse::decode(&body).inspect_err(|e| {
            tracing::debug!("Failed to decode AniList response (HTTP {}): {}", status, e);
        })
    }
}
