use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use super::types::{AssetCtx, ClearinghouseState, Fill, Meta};

const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";

#[derive(Debug, Error)]
pub enum InfoClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Body of a `POST /info` request; the `type` tag selects the query.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum InfoRequest<'a> {
    Meta,
    MetaAndAssetCtxs,
    AllMids,
    ClearinghouseState { user: &'a str },
    UserFills { user: &'a str },
}

/// Read-only client for the Hyperliquid info endpoint.
#[derive(Debug, Clone)]
pub struct InfoClient {
    http: Client,
    base_url: String,
}

impl InfoClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: MAINNET_API_URL.into(),
        }
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn info<T: DeserializeOwned>(
        &self,
        request: &InfoRequest<'_>,
    ) -> Result<T, InfoClientError> {
        let url = format!("{}/info", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }

    /// Fetch the perp universe metadata.
    pub async fn meta(&self) -> Result<Meta, InfoClientError> {
        self.info(&InfoRequest::Meta).await
    }

    /// Fetch metadata plus per-asset contexts. The response is a two-element
    /// array `[meta, contexts]`, with contexts aligned by index to
    /// `meta.universe`.
    pub async fn meta_and_asset_ctxs(&self) -> Result<(Meta, Vec<AssetCtx>), InfoClientError> {
        self.info(&InfoRequest::MetaAndAssetCtxs).await
    }

    /// Fetch all mid prices, keyed by coin symbol.
    pub async fn all_mids(&self) -> Result<HashMap<String, String>, InfoClientError> {
        self.info(&InfoRequest::AllMids).await
    }

    /// Fetch the current account state for a wallet.
    pub async fn clearinghouse_state(
        &self,
        user: &str,
    ) -> Result<ClearinghouseState, InfoClientError> {
        self.info(&InfoRequest::ClearinghouseState { user }).await
    }

    /// Fetch a wallet's fill history, newest first per the API.
    pub async fn user_fills(&self, user: &str) -> Result<Vec<Fill>, InfoClientError> {
        self.info(&InfoRequest::UserFills { user }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_request_bodies() {
        let body = serde_json::to_value(&InfoRequest::MetaAndAssetCtxs).unwrap();
        assert_eq!(body, serde_json::json!({"type": "metaAndAssetCtxs"}));

        let body = serde_json::to_value(&InfoRequest::ClearinghouseState { user: "0xabc" }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type": "clearinghouseState", "user": "0xabc"})
        );

        let body = serde_json::to_value(&InfoRequest::UserFills { user: "0xabc" }).unwrap();
        assert_eq!(body, serde_json::json!({"type": "userFills", "user": "0xabc"}));
    }
}
