//! Reverse geocoding against Nominatim.
//!
//! The [`AddressResolver`] trait is the seam between the pipeline and the
//! network: tests substitute a stub, production uses [`NominatimResolver`].
//! One request per invocation, with no retry and no timeout override;
//! callers needing resilience must wrap the resolver themselves.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::gps::Coordinate;

/// Nominatim reverse-geocoding endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// The outcome of a reverse-geocoding lookup that reached the service.
///
/// `NotFound` (the service answered but has no match) is distinct from a
/// failed lookup, which surfaces as an `Err` from [`AddressResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddressResult {
    Found(String),
    NotFound,
}

impl AddressResult {
    /// The textual form written to the report.
    pub fn display_text(&self) -> &str {
        match self {
            AddressResult::Found(address) => address,
            AddressResult::NotFound => "Address not found",
        }
    }
}

/// Reverse-geocoding collaborator: coordinate pair in, best single match out.
#[async_trait::async_trait]
pub trait AddressResolver: Send + Sync {
    /// The display name of this resolver (e.g., "Nominatim").
    fn name(&self) -> &str;
    /// Resolve a coordinate pair to the single best address.
    async fn resolve(&self, coordinate: &Coordinate) -> Result<AddressResult>;
}

/// Resolver backed by the Nominatim HTTP API.
pub struct NominatimResolver {
    endpoint: String,
    user_agent: String,
    client: Client,
}

impl NominatimResolver {
    /// Create a resolver against the public Nominatim endpoint.
    ///
    /// `user_agent` is the application-identifying client label Nominatim's
    /// usage policy requires; it is injected here rather than fixed as a
    /// module constant.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, user_agent)
    }

    /// Create a resolver against a custom endpoint (self-hosted instance,
    /// or a stub server in tests).
    pub fn with_endpoint(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AddressResolver for NominatimResolver {
    fn name(&self) -> &str {
        "Nominatim"
    }

    async fn resolve(&self, coordinate: &Coordinate) -> Result<AddressResult> {
        // jsonv2 returns the single best match for the coordinate
        let url = format!(
            "{}?format=jsonv2&lat={}&lon={}",
            self.endpoint, coordinate.latitude, coordinate.longitude
        );

        let resp = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .context("Reverse geocoding request failed")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("Failed to read geocoding response")?;

        if !status.is_success() {
            anyhow::bail!("Geocoding service error ({status}): {text}");
        }

        parse_reverse_response(&text)
    }
}

/// Nominatim answers no-match lookups with HTTP 200 and an `error` field
/// instead of a `display_name`.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Parse a Nominatim reverse response body into an [`AddressResult`].
pub fn parse_reverse_response(text: &str) -> Result<AddressResult> {
    let parsed: ReverseResponse =
        serde_json::from_str(text).context("Failed to parse geocoding response JSON")?;

    if let Some(address) = parsed.display_name {
        return Ok(AddressResult::Found(address));
    }
    if let Some(error) = parsed.error {
        log::debug!("Geocoding service returned no match: {error}");
    }
    Ok(AddressResult::NotFound)
}
