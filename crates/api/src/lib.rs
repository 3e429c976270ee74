//! Contrail remote service client utilities.
//!
//! This module provides a lightweight client for interacting with the
//! Contrail API. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Discovering credentials from `CONTRAIL_ACCESS_KEY` or the global config
//! - Validating `CONTRAIL_API_BASE` for safety
//! - Building requests with a consistent User-Agent and Accept headers
//!
//! The primary entry point is [`ContrailClient`]. Create an instance via
//! [`ContrailClient::new_from_env`], and then either use the typed calls
//! ([`ContrailClient::list_projects`] and friends) or build raw requests
//! with [`ContrailClient::request`].

use std::time::Duration;
use std::{env, fs};

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Url, header};
use tracing::debug;

pub mod payloads;

use payloads::{Network, NetworksResponse, Project, ProjectRequest, ProjectResponse, ProjectsResponse};

/// Header carrying the user's access key on every request.
const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Default public API base used when `CONTRAIL_API_BASE` is unset.
const DEFAULT_API_BASE: &str = "https://api.contrail.dev";

/// Allowed hostnames or base domains for non-local configurations of
/// `CONTRAIL_API_BASE`. Subdomains of these domains are also allowed.
const ALLOWED_CONTRAIL_DOMAINS: &[&str] = &["contrail.dev"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Thin wrapper around a configured `reqwest::Client` for Contrail API access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL. Authentication is read from the environment or the
/// user's global config file.
#[derive(Debug, Clone)]
pub struct ContrailClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl ContrailClient {
    /// Construct a [`ContrailClient`] from environment variables and the
    /// global config file.
    ///
    /// Resolution order for authentication:
    /// - `CONTRAIL_ACCESS_KEY` environment variable
    /// - `access_key` in the global config file
    ///
    /// The base URL is taken from `CONTRAIL_API_BASE` (if set) or falls back
    /// to the default public API. Non-localhost hosts must use HTTPS and be
    /// within an allowed Contrail domain.
    pub fn new_from_env() -> Result<Self> {
        let access_key = env::var("CONTRAIL_ACCESS_KEY").ok().or_else(get_stored_access_key);

        let mut default_headers = header::HeaderMap::new();
        if let Some(access_key) = access_key {
            default_headers.insert(ACCESS_KEY_HEADER, header::HeaderValue::from_str(&access_key)?);
        }
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        let base_url = env::var("CONTRAIL_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        validate_base_url(&base_url)?;
        Ok(Self {
            base_url,
            http,
            user_agent: format!("contrail-cli/0.1; {}", env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// Fetch the projects visible to the authenticated account.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let response: ProjectsResponse = self
            .request(reqwest::Method::GET, "/api/v1/projects")
            .send()
            .await
            .context("list projects call")?
            .json()
            .await
            .context("decode projects response")?;

        if let Some(error) = response.error {
            return Err(anyhow!("list projects: {}", error.message));
        }
        Ok(response.projects)
    }

    /// Create a new project under the authenticated account.
    pub async fn create_project(&self, request: ProjectRequest) -> Result<Project> {
        let response: ProjectResponse = self
            .request(reqwest::Method::POST, "/api/v1/projects")
            .json(&request)
            .send()
            .await
            .context("create project call")?
            .json()
            .await
            .context("decode project response")?;

        if let Some(error) = response.error {
            return Err(anyhow!("create project: {}", error.message));
        }
        response.project.context("create project: empty response")
    }

    /// Fetch the catalog of public networks that can be forked.
    pub async fn public_networks(&self) -> Result<Vec<Network>> {
        let response: NetworksResponse = self
            .request(reqwest::Method::GET, "/api/v1/public-networks")
            .send()
            .await
            .context("public networks call")?
            .json()
            .await
            .context("decode networks response")?;

        if let Some(error) = response.error {
            return Err(anyhow!("public networks: {}", error.message));
        }
        Ok(response.networks)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be one of the allowed
///   Contrail domains or a subdomain thereof
fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid CONTRAIL_API_BASE URL '{}': {}", base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("CONTRAIL_API_BASE must include a host"))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    // Production/staging: must be HTTPS and end with one of the allowed domains.
    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "CONTRAIL_API_BASE must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    let is_allowed_domain = ALLOWED_CONTRAIL_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{}", allowed_domain))
    });
    if !is_allowed_domain {
        return Err(anyhow!(
            "CONTRAIL_API_BASE host '{}' is not allowed; must be one of {:?} or a subdomain, or localhost",
            host_name,
            ALLOWED_CONTRAIL_DOMAINS
        ));
    }

    Ok(())
}

/// Attempt to read an access key from the user's global config file.
fn get_stored_access_key() -> Option<String> {
    let path = dirs_next::config_dir()?.join("contrail").join("config.json");
    let content = fs::read_to_string(path).ok()?;
    let config: serde_json::Value = serde_json::from_str(&content).ok()?;
    config
        .get("access_key")
        .and_then(|key| key.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_base_allows_any_scheme() {
        assert!(validate_base_url("http://localhost:9000").is_ok());
        assert!(validate_base_url("http://127.0.0.1:9000").is_ok());
    }

    #[test]
    fn remote_base_requires_https() {
        assert!(validate_base_url("http://api.contrail.dev").is_err());
        assert!(validate_base_url("https://api.contrail.dev").is_ok());
    }

    #[test]
    fn remote_base_must_be_an_allowed_domain() {
        assert!(validate_base_url("https://api.contrail.dev.evil.example").is_err());
        assert!(validate_base_url("https://evil.example").is_err());
        assert!(validate_base_url("https://staging.contrail.dev").is_ok());
    }
}
