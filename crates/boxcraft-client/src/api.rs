use std::fmt;
use std::sync::Arc;

use boxcraft_types::{ApiErrorBody, ListEnvelope, RecordEnvelope};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, GENERIC_ERROR};
use crate::navigate::{Navigator, LOGIN_PATH};
use crate::session::SessionContext;

/// HTTP wrapper shared by every screen. Adds the bearer token and treats any
/// 401 as the end of the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionContext, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match self.session.stored_access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to [`ClientError`].
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            warn!("request failed: {e}");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status == StatusCode::UNAUTHORIZED {
            warn!("401 from {}, ending session", response.url().path());
            self.session.teardown();
            self.navigator.navigate(LOGIN_PATH);
            let message = error_message(response).await;
            return Err(ClientError::Unauthorized(message));
        }

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let envelope: ListEnvelope<T> = self.get_json(path).await?;
        Ok(envelope.into_vec())
    }

    pub async fn get_record<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let envelope: RecordEnvelope<T> = self.get_json(path).await?;
        Ok(envelope.into_inner())
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        decode(response).await
    }

    /// Sends a JSON body and ignores whatever the backend answers with.
    pub async fn mutate<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn error_message(response: Response) -> String {
    response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(ApiErrorBody::into_message)
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}
