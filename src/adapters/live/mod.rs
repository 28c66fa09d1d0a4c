//! Live adapters for the hosted backend and the system.
//!
//! Data, identity, and storage adapters talk to a Supabase-compatible
//! project over its REST endpoints through one shared [`SupabaseClient`].

pub mod analytics;
pub mod clock;
pub mod id_gen;
pub mod identity;
pub mod links;
pub mod profiles;
pub mod redirects;
pub mod storage;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::ports::PortError;

pub use analytics::LiveAnalyticsLog;
pub use clock::LiveClock;
pub use id_gen::LiveIdGenerator;
pub use identity::LiveIdentityProvider;
pub use links::LiveLinkStore;
pub use profiles::LiveProfileStore;
pub use redirects::LiveRedirectStore;
pub use storage::LiveObjectStorage;

/// Thin HTTP client for a Supabase project.
///
/// Cheap to clone; every adapter holds its own copy.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
    data_key: String,
}

/// Error body returned by PostgREST, storage, and auth endpoints.
///
/// Each service names the human-readable field differently.
#[derive(Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl BackendErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.msg).or(self.error_description).or(self.error)
    }
}

impl SupabaseClient {
    /// Creates a client for the configured project.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            data_key: config.data_key().to_string(),
        }
    }

    /// Project base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a PostgREST request against `table`, authenticated with the
    /// server-side data key.
    pub(crate) fn rest(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.data_key)
            .bearer_auth(&self.data_key)
    }

    /// Starts a storage API request at `path` (relative to `/storage/v1/`).
    pub(crate) fn storage(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/storage/v1/{path}", self.base_url))
            .header("apikey", &self.data_key)
            .bearer_auth(&self.data_key)
    }

    /// Starts an auth API request at `path` on behalf of the holder of
    /// `access_token`.
    pub(crate) fn auth(&self, path: &str, access_token: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/auth/v1/{path}", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }
}

/// Filter value for an equality match in a PostgREST query string.
pub(crate) fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Sends `request` and fails on a transport error or non-success status.
pub(crate) async fn send(request: RequestBuilder, what: &str) -> Result<Response, PortError> {
    let response = request
        .send()
        .await
        .map_err(|e| -> PortError { format!("{what}: request failed: {e}").into() })?;
    ensure_success(response, what).await
}

/// Turns a non-success response into an error carrying the backend's message.
pub(crate) async fn ensure_success(response: Response, what: &str) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<BackendErrorBody>(&text)
        .ok()
        .and_then(BackendErrorBody::into_message)
        .unwrap_or(text);
    Err(format!("{what}: backend error ({}): {message}", status.as_u16()).into())
}

/// Decodes a JSON response body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, PortError> {
    let text = response
        .text()
        .await
        .map_err(|e| -> PortError { format!("{what}: failed to read response: {e}").into() })?;
    serde_json::from_str(&text)
        .map_err(|e| -> PortError { format!("{what}: failed to parse response: {e}").into() })
}

/// Sends `request` and decodes the JSON response body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T, PortError> {
    let response = send(request, what).await?;
    read_json(response, what).await
}

/// Sends a PostgREST request expected to return at most one row.
pub(crate) async fn fetch_optional<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<Option<T>, PortError> {
    let rows: Vec<T> = send_json(request, what).await?;
    Ok(rows.into_iter().next())
}

/// Sends a PostgREST write with `return=representation` and returns the row.
pub(crate) async fn fetch_written<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T, PortError> {
    let request = request.header("Prefer", "return=representation");
    fetch_optional(request, what)
        .await?
        .ok_or_else(|| -> PortError { format!("{what}: no row returned").into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> BackendConfig {
        BackendConfig {
            url: "https://project.supabase.co".into(),
            anon_key: "anon".into(),
            service_role_key: Some("service".into()),
        }
    }

    #[test]
    fn rest_requests_target_table_with_data_key() {
        let client = SupabaseClient::new(&backend());
        let request = client
            .rest(Method::GET, "profiles")
            .query(&[("username", eq("alice"))])
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/rest/v1/profiles?username=eq.alice"
        );
        assert_eq!(request.headers()["apikey"], "service");
        assert_eq!(request.headers()["authorization"], "Bearer service");
    }

    #[test]
    fn auth_requests_carry_the_user_token() {
        let client = SupabaseClient::new(&backend());
        let request = client.auth("user", "user-token").build().unwrap();

        assert_eq!(request.url().as_str(), "https://project.supabase.co/auth/v1/user");
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer user-token");
    }

    #[test]
    fn backend_error_body_accepts_known_shapes() {
        for body in [
            r#"{"message":"duplicate key","code":"23505"}"#,
            r#"{"code":400,"msg":"duplicate key"}"#,
            r#"{"statusCode":"409","error":"Duplicate","message":"duplicate key"}"#,
            r#"{"error":"invalid_grant","error_description":"duplicate key"}"#,
        ] {
            let parsed: BackendErrorBody = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.into_message().as_deref(), Some("duplicate key"));
        }
    }
}
