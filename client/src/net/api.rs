//! REST calls against the eduMFA backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! One method per backend operation the admin views use. Controllers call
//! these and only see decoded envelopes or an `ApiError`.
//!
//! ERROR HANDLING
//! ==============
//! Every request carries the `Authorization` header from the auth
//! collaborator. Transport failures, non-2xx statuses and undecodable bodies
//! are all handed to `AuthFactory::auth_error` verbatim before the error is
//! returned; nothing is retried. A 2xx answer with `result.status == false`
//! is returned as a normal envelope for the caller to inspect.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use records::{
    ApiError, ApiResponse, ApplicationDefinitions, AttachTokenParams, ClientTypes, EduMfaServerMap,
    EduMfaServerParams, EduMfaServerTest, Endpoints, Machine, MachineFilter, MachineTokenFilter, MachineTokenKey,
    MachineTokenPage, PasswordReset, RecoveryCodeRequest, TokenOptionParams, decode_response,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpRequest, Transport};
use crate::state::auth::AuthFactory;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Cloneable REST client.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthFactory>,
    endpoints: Endpoints,
}

impl Api {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, auth: Arc<dyn AuthFactory>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            auth,
            endpoints,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // =============================================================
    // eduMFA servers
    // =============================================================

    /// `GET /edumfaserver/`: every definition keyed by identifier.
    pub async fn edumfa_servers(&self) -> ApiResult<EduMfaServerMap> {
        self.exchange(HttpRequest::get(self.endpoints.edumfa_servers())).await
    }

    /// `POST /edumfaserver/{identifier}`: create or replace a definition.
    pub async fn set_edumfa_server(&self, params: &EduMfaServerParams) -> ApiResult<Value> {
        let url = self.endpoints.edumfa_server(&params.identifier);
        self.exchange(HttpRequest::post(url, params.body())).await
    }

    /// `DELETE /edumfaserver/{identifier}`
    pub async fn delete_edumfa_server(&self, identifier: &str) -> ApiResult<Value> {
        self.exchange(HttpRequest::delete(self.endpoints.edumfa_server(identifier)))
            .await
    }

    /// `POST /edumfaserver/test_request`: check a remote server without storing anything.
    pub async fn test_edumfa_server(&self, params: &EduMfaServerTest) -> ApiResult<Value> {
        self.post(self.endpoints.edumfa_server_test(), params).await
    }

    // =============================================================
    // Machines
    // =============================================================

    /// `GET /machine/`
    pub async fn machines(&self, filter: &MachineFilter) -> ApiResult<Vec<Machine>> {
        let request = HttpRequest::get(self.endpoints.machines()).with_query(filter.query());
        self.exchange(request).await
    }

    /// `GET /machine/token`
    pub async fn machine_tokens(&self, filter: &MachineTokenFilter) -> ApiResult<MachineTokenPage> {
        let request = HttpRequest::get(self.endpoints.machine_tokens()).with_query(filter.query());
        self.exchange(request).await
    }

    /// `POST /machine/token`
    pub async fn attach_token(&self, params: &AttachTokenParams) -> ApiResult<Value> {
        self.post(self.endpoints.machine_tokens(), params).await
    }

    /// `DELETE /machine/token/{serial}/{application}/{mtid}`
    pub async fn detach_token(&self, key: &MachineTokenKey) -> ApiResult<Value> {
        self.exchange(HttpRequest::delete(self.endpoints.machine_token(key)))
            .await
    }

    /// `GET /application/`
    pub async fn application_definitions(&self) -> ApiResult<ApplicationDefinitions> {
        self.exchange(HttpRequest::get(self.endpoints.applications())).await
    }

    /// `POST /machine/tokenoption`
    pub async fn save_token_options(&self, params: &TokenOptionParams) -> ApiResult<Value> {
        self.post(self.endpoints.machine_token_options(), params).await
    }

    // =============================================================
    // Components and recovery
    // =============================================================

    /// `GET /client/`
    pub async fn client_types(&self) -> ApiResult<ClientTypes> {
        self.exchange(HttpRequest::get(self.endpoints.client_types())).await
    }

    /// `POST /recover`
    pub async fn request_recovery_code(&self, params: &RecoveryCodeRequest) -> ApiResult<Value> {
        self.post(self.endpoints.recover(), params).await
    }

    /// `POST /recover/reset`
    pub async fn reset_password(&self, params: &PasswordReset) -> ApiResult<Value> {
        self.post(self.endpoints.recover_reset(), params).await
    }

    // =============================================================
    // Plumbing
    // =============================================================

    async fn post<B, R>(&self, url: String, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(body) => self.exchange(HttpRequest::post(url, body)).await,
            Err(e) => Err(self.fail(ApiError::Decode(e.to_string()))),
        }
    }

    async fn exchange<R: DeserializeOwned>(&self, mut request: HttpRequest) -> ApiResult<R> {
        request.authorization = self.auth.auth_token();
        let method = request.method;
        let url = request.full_url();
        let result = self.transport.send(request).await.and_then(|resp| {
            if resp.is_success() {
                decode_response(resp.body)
            } else {
                Err(ApiError::from_response(resp.status, resp.body))
            }
        });
        match result {
            Ok(envelope) => {
                log::debug!("{method:?} {url}: status={}", envelope.succeeded());
                Ok(envelope)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&self, error: ApiError) -> ApiError {
        self.auth.auth_error(&error);
        error
    }
}
