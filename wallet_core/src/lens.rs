//! Lens Protocol profile resolver (GraphQL over HTTP).

use std::time::Duration;

use async_trait::async_trait;
use luvpay_types::{ChainAddress, Profile};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::WalletError;
use crate::profiles::ProfileResolver;

/// Public Lens API endpoint.
pub const DEFAULT_LENS_API_URL: &str = "https://api-v2.lens.dev";

const PROFILE_FIELDS: &str = r#"
fragment ProfileFields on Profile {
  id
  ownedBy { address }
  handle { localName suggestedFormatted { localName } }
  metadata { picture { ... on ImageSet { optimized { uri } } } }
}
"#;

const SEARCH_PROFILES: &str = r#"
query SearchProfiles($query: String!) {
  result: searchProfiles(request: { query: $query }) {
    items { ...ProfileFields }
  }
}
"#;

const PROFILES_OWNED_BY: &str = r#"
query ProfilesOwnedBy($owner: EvmAddress!) {
  result: profiles(request: { where: { ownedBy: [$owner] } }) {
    items { ...ProfileFields }
  }
}
"#;

/// HTTP client for the Lens GraphQL API.
pub struct LensClient {
    http: reqwest::Client,
    api_url: String,
}

impl LensClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Resolver(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn query(&self, query: &str, variables: Value) -> Result<Vec<Profile>, WalletError> {
        let body = json!({
            "query": format!("{query}{PROFILE_FIELDS}"),
            "variables": variables,
        });

        let response = self
            .http
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Resolver(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Resolver(format!(
                "Lens API returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Resolver(format!("invalid JSON response: {e}")))?;

        parse_profiles(json)
    }
}

#[async_trait]
impl ProfileResolver for LensClient {
    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, WalletError> {
        let profiles = self.query(SEARCH_PROFILES, json!({ "query": query })).await?;
        tracing::debug!(query, found = profiles.len(), "lens profile search");
        Ok(profiles)
    }

    async fn profiles_owned_by(&self, address: &ChainAddress) -> Result<Vec<Profile>, WalletError> {
        self.query(PROFILES_OWNED_BY, json!({ "owner": address.as_str() }))
            .await
    }
}

// ── Response mapping ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResultData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ResultData {
    result: Option<Page>,
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    items: Vec<LensProfile>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LensProfile {
    id: String,
    owned_by: OwnedBy,
    handle: Option<Handle>,
    metadata: Option<Metadata>,
}

#[derive(Deserialize)]
struct OwnedBy {
    address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Handle {
    local_name: String,
    suggested_formatted: Option<SuggestedFormatted>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestedFormatted {
    local_name: String,
}

#[derive(Deserialize)]
struct Metadata {
    picture: Option<Picture>,
}

#[derive(Deserialize)]
struct Picture {
    optimized: Option<Optimized>,
}

#[derive(Deserialize)]
struct Optimized {
    uri: Option<String>,
}

impl From<LensProfile> for Profile {
    fn from(p: LensProfile) -> Self {
        let handle = p.handle.map(|h| match h.suggested_formatted {
            Some(formatted) => formatted.local_name,
            None => h.local_name,
        });
        let avatar_uri = p
            .metadata
            .and_then(|m| m.picture)
            .and_then(|pic| pic.optimized)
            .and_then(|o| o.uri);
        Profile {
            id: p.id,
            handle,
            owned_by: p.owned_by.address,
            avatar_uri,
        }
    }
}

fn parse_profiles(json: Value) -> Result<Vec<Profile>, WalletError> {
    let response: GraphQlResponse = serde_json::from_value(json)
        .map_err(|e| WalletError::Resolver(format!("unexpected response shape: {e}")))?;

    if let Some(first) = response.errors.first() {
        return Err(WalletError::Resolver(first.message.clone()));
    }

    Ok(response
        .data
        .and_then(|d| d.result)
        .map(|page| page.items.into_iter().map(Profile::from).collect())
        .unwrap_or_default())
}
