//! HTTP client for the content service API.
//!
//! [`ApiClient`] owns the authentication gate: `login` verifies credentials
//! against `/auth/login` and keeps the issued session token, `logout` drops
//! it. [`RemoteTable`] implements [`Table`] over `/api/v1/{table}` so the
//! editor works the same against the live API and the in-memory store.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use teamunited_core::error::CoreError;
use teamunited_core::gate::{AuthMethod, CredentialCheck, GateState, Principal};
use teamunited_core::listing::ListQuery;
use teamunited_core::roles::ROLE_ADMIN;
use teamunited_core::types::DbId;
use teamunited_db::store::{Record, StoreError, StoreResult, Table};

use crate::client_state::SavedAuth;
use crate::error::AdminResult;

/// `{ "data": ... }` response envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
    principal: Principal,
}

#[derive(Deserialize)]
struct SessionData {
    identifier: String,
    is_admin: bool,
    method: AuthMethod,
}

/// The check that yields `principal` when replayed through the gate.
fn check_for(principal: &Principal) -> CredentialCheck {
    match principal.method {
        AuthMethod::Fallback => CredentialCheck::FallbackMatched,
        AuthMethod::Account => CredentialCheck::AccountMatched {
            is_admin: principal.role == ROLE_ADMIN,
        },
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Map a non-success response onto the store error taxonomy.
async fn status_error(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response
        .json::<ErrorBody>()
        .await
        .unwrap_or_else(|_| ErrorBody {
            error: status.canonical_reason().unwrap_or("unknown error").to_string(),
            code: String::new(),
        });

    tracing::debug!(status = status.as_u16(), code = %body.code, "API call failed");

    match status {
        StatusCode::SERVICE_UNAVAILABLE => StoreError::Unavailable(body.error),
        StatusCode::CONFLICT => StoreError::UniqueViolation(body.error),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized(body.error),
        s if s.is_server_error() => StoreError::Unavailable(body.error),
        _ => StoreError::Rejected(body.error),
    }
}

async fn ensure_success(response: reqwest::Response) -> StoreResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response).await)
    }
}

async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> StoreResult<T> {
    let response = ensure_success(response).await?;
    let envelope = response
        .json::<Envelope<T>>()
        .await
        .map_err(|e| StoreError::Rejected(format!("Malformed response: {e}")))?;
    Ok(envelope.data)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Signed-in (or not) connection to one content service.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    gate: GateState,
    token: Option<String>,
}

impl ApiClient {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            gate: GateState::default(),
            token: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    pub fn gate(&self) -> &GateState {
        &self.gate
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.gate.principal()
    }

    /// The current session, in the shape [`crate::ClientState`] persists.
    pub fn saved_auth(&self) -> Option<SavedAuth> {
        let principal = self.gate.principal()?;
        let token = self.token.clone()?;
        Some(SavedAuth {
            identifier: principal.identifier.clone(),
            token,
        })
    }

    /// Sign in with an email (or the fallback username) and password.
    ///
    /// A rejected login leaves any existing session in place.
    pub async fn login(&mut self, identifier: &str, password: &str) -> AdminResult<&Principal> {
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&serde_json::json!({ "identifier": identifier, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.json::<ErrorBody>().await.ok();
            let message = body.map_or_else(|| "Invalid email or password".to_string(), |b| b.error);
            return Err(CoreError::Unauthorized(message).into());
        }

        let data: LoginData = parse_data(response).await?;
        let check = check_for(&data.principal);
        self.token = Some(data.token);
        Ok(self.gate.login(&data.principal.identifier, check)?)
    }

    /// Resume a persisted session. Returns `false` (and stays signed out)
    /// if the server no longer accepts the token.
    pub async fn resume(&mut self, saved: &SavedAuth) -> AdminResult<bool> {
        let response = self
            .client
            .get(self.url("auth/session"))
            .bearer_auth(&saved.token)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.gate.logout();
            self.token = None;
            return Ok(false);
        }

        let data: SessionData = parse_data(response).await?;
        let check = match data.method {
            AuthMethod::Fallback => CredentialCheck::FallbackMatched,
            AuthMethod::Account => CredentialCheck::AccountMatched {
                is_admin: data.is_admin,
            },
        };
        self.gate.login(&data.identifier, check)?;
        self.token = Some(saved.token.clone());
        Ok(true)
    }

    /// Sign out. Always succeeds locally; the server-side revoke is best
    /// effort.
    pub async fn logout(&mut self) {
        if let Some(token) = self.token.take() {
            let result = self
                .client
                .post(self.url("auth/logout"))
                .bearer_auth(token)
                .send()
                .await;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Logout request failed; session dropped locally");
            }
        }
        self.gate.logout();
    }

    /// A handle on one table, carrying the current session token.
    pub fn table<E: Record>(&self) -> RemoteTable<E> {
        RemoteTable {
            client: self.client.clone(),
            base_url: self.url(E::ROUTE),
            token: self.token.clone(),
            _record: PhantomData,
        }
    }
}

// ---------------------------------------------------------------------------
// Remote table
// ---------------------------------------------------------------------------

/// [`Table`] over the HTTP API.
///
/// Writes need a signed-in [`ApiClient`]; without a token the server answers
/// 401 and the call fails with [`StoreError::Unauthorized`].
pub struct RemoteTable<E> {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    _record: PhantomData<fn() -> E>,
}

impl<E> RemoteTable<E> {
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn item_url(&self, id: DbId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl<E: Record> Table<E> for RemoteTable<E> {
    async fn list(&self, query: &ListQuery) -> StoreResult<Vec<E>> {
        let request = self.client.get(&self.base_url).query(query);
        let response = self.authorized(request).send().await.map_err(transport_error)?;
        parse_data(response).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<E>> {
        let request = self.client.get(self.item_url(id));
        let response = self.authorized(request).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse_data(response).await.map(Some)
    }

    async fn create(&self, input: &E::Create) -> StoreResult<E> {
        let request = self.client.post(&self.base_url).json(input);
        let response = self.authorized(request).send().await.map_err(transport_error)?;
        parse_data(response).await
    }

    async fn update(&self, id: DbId, input: &E::Update) -> StoreResult<Option<E>> {
        let request = self.client.put(self.item_url(id)).json(input);
        let response = self.authorized(request).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse_data(response).await.map(Some)
    }

    /// The API deletes idempotently, so success is reported as `true`.
    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let request = self.client.delete(self.item_url(id));
        let response = self.authorized(request).send().await.map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(true)
    }
}
