//! Upstream provider adapters.
//!
//! One client per botanical data source. Every public operation either
//! returns a parsed, typed result or fails with a [`ProviderError`]
//! carrying the provider name and, for upstream rejections, the HTTP
//! status. Callers above this layer decide whether to fall back or
//! propagate.

pub mod gbif;
pub mod perenual;
pub mod trefle;
pub mod tropicos;
pub mod wikipedia;

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use halaman_common::config::Settings;

pub use gbif::GbifClient;
pub use perenual::PerenualClient;
pub use trefle::TrefleClient;
pub use tropicos::TropicosClient;
pub use wikipedia::WikipediaClient;

pub(crate) const USER_AGENT: &str =
    concat!("halaman/", env!("CARGO_PKG_VERSION"), " (plant encyclopedia)");

/// Default timeout for provider calls. The RSS fetcher uses a tighter
/// per-request bound of its own.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider adapter errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} network error: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} API error: status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} parse error: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} API key not configured")]
    MissingCredential { provider: &'static str },

    #[error("{provider}: {entity} not found")]
    NotFound {
        provider: &'static str,
        entity: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Network { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. }
            | ProviderError::MissingCredential { provider }
            | ProviderError::NotFound { provider, .. } => provider,
        }
    }

    /// True when the upstream answered but the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProviderError::NotFound { .. } | ProviderError::Status { status: 404, .. }
        )
    }
}

/// Build the shared HTTP client used by the adapters.
pub(crate) fn http_client(provider: &'static str) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::Network {
            provider,
            message: e.to_string(),
        })
}

/// GET a URL and decode the JSON body, translating transport and status
/// failures into `ProviderError`s tagged with `provider`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: &'static str,
    url: Url,
) -> Result<T, ProviderError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ProviderError::Network {
            provider,
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    response.json().await.map_err(|e| ProviderError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// All provider clients, constructed once at startup and shared across
/// requests.
pub struct Providers {
    pub trefle: TrefleClient,
    pub gbif: GbifClient,
    pub tropicos: TropicosClient,
    pub perenual: PerenualClient,
    pub wikipedia: WikipediaClient,
}

impl Providers {
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        Ok(Self {
            trefle: TrefleClient::new(settings.trefle_token.clone())?,
            gbif: GbifClient::new()?,
            tropicos: TropicosClient::new(settings.tropicos_key.clone())?,
            perenual: PerenualClient::new(settings.perenual_key.clone())?,
            wikipedia: WikipediaClient::new()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        let err = ProviderError::Status {
            provider: "gbif",
            status: 404,
        };
        assert!(err.is_not_found());

        let err = ProviderError::Status {
            provider: "gbif",
            status: 500,
        };
        assert!(!err.is_not_found());

        let err = ProviderError::NotFound {
            provider: "tropicos",
            entity: "name 1".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.provider(), "tropicos");
    }
}
