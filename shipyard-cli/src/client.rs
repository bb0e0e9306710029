//! HTTP client for the Shipyard REST API.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shipyard_core::{Ship, ShipPatch};

use crate::CliResult;

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Thin async wrapper over the `/rest/ships` endpoints.
pub(crate) struct ShipClient {
    http: Client,
    base_url: String,
}

impl ShipClient {
    /// Build a client for `server_url`.
    pub(crate) fn new(server_url: &str) -> CliResult<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: normalize_server_url(server_url)?,
        })
    }

    fn ships_url(&self) -> String {
        format!("{}/rest/ships", self.base_url)
    }

    fn ship_url(&self, id: i64) -> String {
        format!("{}/rest/ships/{id}", self.base_url)
    }

    pub(crate) async fn list(&self, query: &[(&str, String)]) -> CliResult<Vec<Ship>> {
        let response = self.http.get(self.ships_url()).query(query).send().await?;
        read_json(response).await
    }

    pub(crate) async fn count(&self, query: &[(&str, String)]) -> CliResult<usize> {
        let response = self
            .http
            .get(format!("{}/count", self.ships_url()))
            .query(query)
            .send()
            .await?;
        read_json(response).await
    }

    pub(crate) async fn create(&self, patch: &ShipPatch) -> CliResult<Ship> {
        let response = self.http.post(self.ships_url()).json(patch).send().await?;
        read_json(response).await
    }

    pub(crate) async fn get(&self, id: i64) -> CliResult<Ship> {
        let response = self.http.get(self.ship_url(id)).send().await?;
        read_json(response).await
    }

    pub(crate) async fn update(&self, id: i64, patch: &ShipPatch) -> CliResult<Ship> {
        let response = self.http.post(self.ship_url(id)).json(patch).send().await?;
        read_json(response).await
    }

    pub(crate) async fn delete(&self, id: i64) -> CliResult<()> {
        let response = self.http.delete(self.ship_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Normalize the server URL for consistent API requests.
fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err("server url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check_status(response: Response) -> CliResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    Err(format!("server returned {status}: {message}").into())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> CliResult<T> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}
